/// Which corner a fighter fights from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

/// Fighter component - one per side
#[derive(Debug, Clone, Copy)]
pub struct Fighter {
    pub side: Side,
}

impl Fighter {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

/// Health component, never below zero or above `max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub cur: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        let max = max.max(1);
        Self { cur: max, max }
    }

    pub fn take(&mut self, damage: i32) {
        self.cur = (self.cur - damage.max(0)).clamp(0, self.max);
    }

    pub fn is_down(&self) -> bool {
        self.cur <= 0
    }

    /// Health as a display percentage, always within `[0, 100]`
    pub fn percent(&self) -> u8 {
        let max = i64::from(self.max.max(1));
        (i64::from(self.cur) * 100 / max).clamp(0, 100) as u8
    }
}

/// Consecutive unblocked hits, plus the longest chain this match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Combo {
    pub current: u32,
    pub best: u32,
}

impl Combo {
    pub fn hit(&mut self) {
        self.current += 1;
        self.best = self.best.max(self.current);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Points earned by landed punches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }
}

/// Read-only view of the player's numbers for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub health: i32,
    pub score: u32,
    pub combo: u32,
}
