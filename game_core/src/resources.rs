use crate::GestureType;

/// Countdown clock, one tick per second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchClock {
    pub total: u32,
    pub remaining: u32,
}

impl MatchClock {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    /// Seconds played so far
    pub fn elapsed(&self) -> u32 {
        self.total - self.remaining
    }
}

/// Debounce for player actions, measured against the caller's clock in ms
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionCooldown {
    pub last_accepted_ms: Option<u64>,
}

impl ActionCooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an action at `now_ms` unless one was accepted less than
    /// `cooldown_ms` ago
    pub fn try_accept(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < cooldown_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

/// Player's gesture as of the latest frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Guard {
    pub gesture: GestureType,
}

impl Guard {
    pub fn is_blocking(&self) -> bool {
        self.gesture == GestureType::Block
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// How an accepted punch played out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchOutcome {
    Landed { gesture: GestureType, damage: i32 },
    Blocked { gesture: GestureType },
}

/// Events that occurred during the last frame or tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub punch: Option<PunchOutcome>,
    pub opponent_attacked: bool,
    pub player_damaged: bool,
    pub clock_ticked: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.punch = None;
        self.opponent_attacked = false;
        self.player_damaged = false;
        self.clock_ticked = false;
    }
}

/// Text overlay for the last punch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Hit,
    Blocked,
}

impl FeedbackKind {
    pub fn text(self) -> &'static str {
        match self {
            FeedbackKind::Hit => "HIT!",
            FeedbackKind::Blocked => "BLOCKED!",
        }
    }
}

/// Transient visual feedback. The text stays until replaced, the hit flash
/// expires on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Feedback {
    pub kind: Option<FeedbackKind>,
    pub flash_until_ms: u64,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_hit(&mut self, now_ms: u64, flash_ms: u64) {
        self.kind = Some(FeedbackKind::Hit);
        self.flash_until_ms = now_ms.saturating_add(flash_ms);
    }

    pub fn show_blocked(&mut self) {
        self.kind = Some(FeedbackKind::Blocked);
    }

    pub fn text(&self) -> Option<&'static str> {
        self.kind.map(FeedbackKind::text)
    }

    pub fn flash_active(&self, now_ms: u64) -> bool {
        now_ms < self.flash_until_ms
    }
}
