/// How a match ended, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    pub fn is_victory(self) -> bool {
        self == Outcome::Victory
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Victory => "VICTORY",
            Outcome::Defeat => "DEFEAT",
        }
    }
}

/// Final numbers of one match. Built once when the match resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    outcome: Outcome,
    time_elapsed: u32,
    damage_dealt: u32,
    final_health: u32,
    max_combo: u32,
    commentary: Option<String>,
}

impl MatchResult {
    pub fn new(
        outcome: Outcome,
        time_elapsed: u32,
        damage_dealt: u32,
        final_health: u32,
        max_combo: u32,
    ) -> Self {
        Self {
            outcome,
            time_elapsed,
            damage_dealt,
            final_health,
            max_combo,
            commentary: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Seconds played
    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }

    /// Mirrors the score
    pub fn damage_dealt(&self) -> u32 {
        self.damage_dealt
    }

    pub fn final_health(&self) -> u32 {
        self.final_health
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    pub fn with_commentary(mut self, text: impl Into<String>) -> Self {
        self.commentary = Some(text.into());
        self
    }
}
