pub mod commentary;
pub mod components;
pub mod config;
pub mod gesture;
pub mod params;
pub mod resources;
pub mod result;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use gesture::*;
pub use params::*;
pub use resources::*;
pub use result::*;
pub use session::*;
pub use systems::*;

use hecs::World;

/// Helper to create a fighter entity. The player also tracks combo and score.
pub fn create_fighter(world: &mut World, side: Side, max_health: i32) -> hecs::Entity {
    match side {
        Side::Player => world.spawn((
            Fighter::new(side),
            Health::full(max_health),
            Combo::default(),
            Score::default(),
        )),
        Side::Opponent => world.spawn((Fighter::new(side), Health::full(max_health))),
    }
}
