use crate::{ActionCooldown, Config, GestureType, Guard};

/// Record the frame's gesture and turn a punch into an accepted action.
///
/// The guard always follows the latest frame. Punches only count when the
/// cooldown since the last accepted punch has run out.
pub fn ingest_gesture(
    gesture: GestureType,
    now_ms: u64,
    guard: &mut Guard,
    cooldown: &mut ActionCooldown,
    config: &Config,
) -> Option<GestureType> {
    guard.gesture = gesture;

    if gesture.is_punch() && cooldown.try_accept(now_ms, config.action_cooldown_ms) {
        Some(gesture)
    } else {
        None
    }
}
