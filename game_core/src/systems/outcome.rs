use crate::{Fighter, Health, Outcome, Side};
use hecs::World;

/// Current health of the fighter on `side`
pub fn fighter_health(world: &World, side: Side) -> Option<Health> {
    world
        .query::<(&Fighter, &Health)>()
        .iter()
        .find(|(_e, (fighter, _))| fighter.side == side)
        .map(|(_e, (_, health))| *health)
}

/// Knockout check, run after every health change
pub fn check_knockout(world: &World) -> Option<Outcome> {
    let opponent_down = fighter_health(world, Side::Opponent).is_some_and(|h| h.is_down());
    let player_down = fighter_health(world, Side::Player).is_some_and(|h| h.is_down());

    if opponent_down {
        Some(Outcome::Victory)
    } else if player_down {
        Some(Outcome::Defeat)
    } else {
        None
    }
}

/// Decision when the clock runs out: the player must be strictly ahead
pub fn decide_on_time(world: &World) -> Outcome {
    let player = fighter_health(world, Side::Player).map_or(0, |h| h.cur);
    let opponent = fighter_health(world, Side::Opponent).map_or(0, |h| h.cur);

    if opponent < player {
        Outcome::Victory
    } else {
        Outcome::Defeat
    }
}
