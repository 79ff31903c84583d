/// Game tuning parameters for Gesture Fighter
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Match
    pub const MATCH_SECONDS: u32 = 60;
    pub const TICK_MS: u32 = 1000;
    pub const START_DELAY_MS: u32 = 1500; // Stand-in for model loading

    // Fighters
    pub const MAX_HEALTH: i32 = 100;

    // Gestures
    pub const FIST_THRESHOLD: f32 = 0.25; // Mean fingertip-to-wrist distance, normalized units

    // Player punches
    pub const ACTION_COOLDOWN_MS: u64 = 500;
    pub const PUNCH_DAMAGE_MIN: i32 = 5;
    pub const PUNCH_DAMAGE_MAX: i32 = 14; // Inclusive
    pub const HIT_SCORE: u32 = 100;
    pub const OPPONENT_BLOCK_CHANCE: f64 = 0.3;

    // Opponent attacks (rolled once per tick)
    pub const OPPONENT_ATTACK_CHANCE: f64 = 0.2;
    pub const OPPONENT_ATTACK_DAMAGE: i32 = 8;

    // Feedback
    pub const HIT_FLASH_MS: u64 = 200;

    // Camera
    pub const CAMERA_WIDTH: u32 = 640;
    pub const CAMERA_HEIGHT: u32 = 480;
}
