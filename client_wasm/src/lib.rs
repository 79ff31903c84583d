//! Browser client for Gesture Fighter
//!
//! Reads hands from the webcam through a hand-tracking model, turns them
//! into punches and blocks, and runs the match from `game_core` against the
//! scripted opponent. Everything except `web` builds and tests natively.

pub mod app;
pub mod camera;
pub mod commentary;
pub mod error;
pub mod fsm;
pub mod logging;
pub mod tracker;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use error::ClientError;
pub use fsm::{GameAction, GameFsm, Phase, TransitionResult};

#[cfg(target_arch = "wasm32")]
pub use web::GestureFighter;
