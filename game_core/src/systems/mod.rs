pub mod clock;
pub mod combat;
pub mod input;
pub mod outcome;

pub use clock::*;
pub use combat::*;
pub use input::*;
pub use outcome::*;
