use crate::Params;
use serde::{Deserialize, Serialize};

/// Game configuration
///
/// Every field falls back to its `Params` default, so a partial override
/// (e.g. `{"match_seconds": 30}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub match_seconds: u32,
    pub tick_ms: u32,
    pub start_delay_ms: u32,
    pub max_health: i32,
    pub fist_threshold: f32,
    pub action_cooldown_ms: u64,
    pub punch_damage_min: i32,
    pub punch_damage_max: i32,
    pub hit_score: u32,
    pub opponent_block_chance: f64,
    pub opponent_attack_chance: f64,
    pub opponent_attack_damage: i32,
    pub hit_flash_ms: u64,
    pub camera_width: u32,
    pub camera_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_seconds: Params::MATCH_SECONDS,
            tick_ms: Params::TICK_MS,
            start_delay_ms: Params::START_DELAY_MS,
            max_health: Params::MAX_HEALTH,
            fist_threshold: Params::FIST_THRESHOLD,
            action_cooldown_ms: Params::ACTION_COOLDOWN_MS,
            punch_damage_min: Params::PUNCH_DAMAGE_MIN,
            punch_damage_max: Params::PUNCH_DAMAGE_MAX,
            hit_score: Params::HIT_SCORE,
            opponent_block_chance: Params::OPPONENT_BLOCK_CHANCE,
            opponent_attack_chance: Params::OPPONENT_ATTACK_CHANCE,
            opponent_attack_damage: Params::OPPONENT_ATTACK_DAMAGE,
            hit_flash_ms: Params::HIT_FLASH_MS,
            camera_width: Params::CAMERA_WIDTH,
            camera_height: Params::CAMERA_HEIGHT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring out-of-range values back into something the simulation can run
    pub fn normalized(mut self) -> Self {
        self.match_seconds = self.match_seconds.max(1);
        self.tick_ms = self.tick_ms.max(1);
        self.max_health = self.max_health.max(1);
        self.opponent_block_chance = clamp_chance(self.opponent_block_chance);
        self.opponent_attack_chance = clamp_chance(self.opponent_attack_chance);
        self.punch_damage_min = self.punch_damage_min.max(0);
        self.punch_damage_max = self.punch_damage_max.max(0);
        if self.punch_damage_min > self.punch_damage_max {
            std::mem::swap(&mut self.punch_damage_min, &mut self.punch_damage_max);
        }
        self.opponent_attack_damage = self.opponent_attack_damage.max(0);
        if !self.fist_threshold.is_finite() || self.fist_threshold < 0.0 {
            self.fist_threshold = Params::FIST_THRESHOLD;
        }
        self
    }
}

fn clamp_chance(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
