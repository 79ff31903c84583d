//! Match Lifecycle State Machine
//!
//! Decides which screen is active: title, the fight itself, or a result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Screen phases
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    Victory,
    Defeat,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Title => "TITLE",
            Phase::Playing => "PLAYING",
            Phase::Victory => "VICTORY",
            Phase::Defeat => "DEFEAT",
        }
    }
}

/// Actions that trigger phase transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    Win,
    Lose,
    Restart,
    Menu,
}

/// Result of a phase transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_phase: Phase,
    to_phase: Phase,
    action: GameAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_phase(&self) -> Phase {
        self.from_phase
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_phase(&self) -> Phase {
        self.to_phase
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> GameAction {
        self.action
    }
}

/// Match lifecycle state machine
#[derive(Debug)]
pub struct GameFsm {
    phase: Phase,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            phase: Phase::Title,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: GameAction) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_phase = self.phase;

        if let Some(next_phase) = self.next_phase(action) {
            self.phase = next_phase;
            TransitionResult {
                success: true,
                from_phase,
                to_phase: next_phase,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_phase,
                to_phase: from_phase,
                action,
            }
        }
    }

    /// Parse an action name coming from JS ("START", "MENU", ...)
    pub fn parse_action(action: &str) -> Option<GameAction> {
        match action {
            "START" => Some(GameAction::Start),
            "WIN" => Some(GameAction::Win),
            "LOSE" => Some(GameAction::Lose),
            "RESTART" => Some(GameAction::Restart),
            "MENU" => Some(GameAction::Menu),
            _ => None,
        }
    }

    /// Get next phase for a given action (if valid)
    fn next_phase(&self, action: GameAction) -> Option<Phase> {
        match (self.phase, action) {
            // Menu is reachable from everywhere
            (_, GameAction::Menu) => Some(Phase::Title),

            (Phase::Title, GameAction::Start) => Some(Phase::Playing),

            (Phase::Playing, GameAction::Win) => Some(Phase::Victory),
            (Phase::Playing, GameAction::Lose) => Some(Phase::Defeat),

            (Phase::Victory, GameAction::Restart) => Some(Phase::Playing),
            (Phase::Defeat, GameAction::Restart) => Some(Phase::Playing),

            // Invalid transition
            _ => None,
        }
    }

    /// Reset to Title
    pub fn reset(&mut self) {
        self.phase = Phase::Title;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Check if a result screen is showing
    pub fn is_result(&self) -> bool {
        matches!(self.phase, Phase::Victory | Phase::Defeat)
    }
}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}
