//! One match against the scripted opponent.
//!
//! The session is deterministic for a given seed: callers feed it classified
//! gestures with a millisecond timestamp and one `tick` per clock second.

use hecs::World;

use crate::components::*;
use crate::resources::*;
use crate::systems::*;
use crate::{create_fighter, Config, GestureType, MatchResult, Outcome};

pub struct MatchSession {
    world: World,
    config: Config,
    clock: MatchClock,
    cooldown: ActionCooldown,
    guard: Guard,
    feedback: Feedback,
    events: Events,
    rng: GameRng,
    outcome: Option<Outcome>,
    result: Option<MatchResult>,
}

impl MatchSession {
    pub fn new(config: Config, seed: u64) -> Self {
        let config = config.normalized();
        let mut world = World::new();
        create_fighter(&mut world, Side::Player, config.max_health);
        create_fighter(&mut world, Side::Opponent, config.max_health);

        Self {
            world,
            clock: MatchClock::new(config.match_seconds),
            config,
            cooldown: ActionCooldown::new(),
            guard: Guard::default(),
            feedback: Feedback::new(),
            events: Events::new(),
            rng: GameRng::new(seed),
            outcome: None,
            result: None,
        }
    }

    /// Feed the gesture classified for the current video frame
    pub fn observe(&mut self, gesture: GestureType, now_ms: u64) -> &Events {
        self.events.clear();
        if self.is_over() {
            return &self.events;
        }

        let accepted = ingest_gesture(
            gesture,
            now_ms,
            &mut self.guard,
            &mut self.cooldown,
            &self.config,
        );

        if let Some(punch) = accepted {
            match resolve_punch(
                &mut self.world,
                punch,
                &self.config,
                &mut self.rng,
                &mut self.events,
            ) {
                PunchOutcome::Landed { .. } => {
                    self.feedback.show_hit(now_ms, self.config.hit_flash_ms)
                }
                PunchOutcome::Blocked { .. } => self.feedback.show_blocked(),
            }

            if let Some(outcome) = check_knockout(&self.world) {
                self.finish(outcome);
            }
        }

        &self.events
    }

    /// One second of match time: clock first, then the opponent's roll
    pub fn tick(&mut self) -> &Events {
        self.events.clear();
        if self.is_over() {
            return &self.events;
        }

        advance_clock(&mut self.clock, &mut self.events);
        if self.clock.expired() {
            let outcome = decide_on_time(&self.world);
            self.finish(outcome);
            return &self.events;
        }

        opponent_attack(
            &mut self.world,
            &self.guard,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );
        if let Some(outcome) = check_knockout(&self.world) {
            self.finish(outcome);
        }

        &self.events
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        let stats = self.player_stats();
        let best_combo = self
            .world
            .query::<(&Fighter, &Combo)>()
            .iter()
            .find(|(_e, (fighter, _))| fighter.side == Side::Player)
            .map_or(0, |(_e, (_, combo))| combo.best);

        let result = MatchResult::new(
            outcome,
            self.clock.elapsed(),
            stats.score,
            stats.health.max(0) as u32,
            best_combo,
        );
        log::info!(
            "Match over: {} after {}s (score {}, health {}, best combo {})",
            outcome.label(),
            result.time_elapsed(),
            result.damage_dealt(),
            result.final_health(),
            result.max_combo()
        );

        self.outcome = Some(outcome);
        self.result = Some(result);
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Hand over the result. Only the first call after the match ends gets it.
    pub fn take_result(&mut self) -> Option<MatchResult> {
        self.result.take()
    }

    pub fn player_stats(&self) -> PlayerStats {
        self.world
            .query::<(&Fighter, &Health, &Score, &Combo)>()
            .iter()
            .find(|(_e, (fighter, ..))| fighter.side == Side::Player)
            .map_or(
                PlayerStats {
                    health: 0,
                    score: 0,
                    combo: 0,
                },
                |(_e, (_, health, score, combo))| PlayerStats {
                    health: health.cur,
                    score: score.points,
                    combo: combo.current,
                },
            )
    }

    pub fn player_health(&self) -> Health {
        fighter_health(&self.world, Side::Player).unwrap_or(Health {
            cur: 0,
            max: self.config.max_health,
        })
    }

    pub fn opponent_health(&self) -> Health {
        fighter_health(&self.world, Side::Opponent).unwrap_or(Health {
            cur: 0,
            max: self.config.max_health,
        })
    }

    pub fn time_left(&self) -> u32 {
        self.clock.remaining
    }

    pub fn gesture(&self) -> GestureType {
        self.guard.gesture
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> Config {
        Config {
            opponent_block_chance: 0.0,
            opponent_attack_chance: 0.0,
            punch_damage_min: 10,
            punch_damage_max: 10,
            ..Config::new()
        }
    }

    #[test]
    fn test_new_session_is_fresh() {
        let session = MatchSession::new(Config::new(), 1);
        assert_eq!(session.time_left(), 60);
        assert_eq!(
            session.player_stats(),
            PlayerStats {
                health: 100,
                score: 0,
                combo: 0
            }
        );
        assert_eq!(session.opponent_health().cur, 100);
        assert_eq!(session.gesture(), GestureType::Idle);
        assert!(!session.is_over());
    }

    #[test]
    fn test_landed_punch_shows_hit_feedback() {
        let mut session = MatchSession::new(quiet_config(), 1);
        session.observe(GestureType::RightPunch, 1_000);
        assert_eq!(session.feedback().text(), Some("HIT!"));
        assert!(session.feedback().flash_active(1_100));
        assert!(!session.feedback().flash_active(1_200));
        assert_eq!(session.opponent_health().cur, 90);
    }

    #[test]
    fn test_blocked_punch_shows_blocked_feedback() {
        let config = Config {
            opponent_block_chance: 1.0,
            ..quiet_config()
        };
        let mut session = MatchSession::new(config, 1);
        session.observe(GestureType::LeftPunch, 0);
        assert_eq!(session.feedback().text(), Some("BLOCKED!"));
        assert!(!session.feedback().flash_active(0));
    }

    #[test]
    fn test_result_is_taken_once() {
        let mut session = MatchSession::new(quiet_config(), 1);
        for _ in 0..60 {
            session.tick();
        }
        assert!(session.is_over());
        assert!(session.take_result().is_some());
        assert!(session.take_result().is_none());
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut session = MatchSession::new(quiet_config(), 1);
        for _ in 0..60 {
            session.tick();
        }
        let events = session.observe(GestureType::RightPunch, 10_000);
        assert!(events.punch.is_none());
        let events = session.tick();
        assert!(!events.clock_ticked);
        assert_eq!(session.opponent_health().cur, 100);
    }

    #[test]
    fn test_max_combo_survives_reset() {
        let config = Config {
            opponent_attack_chance: 1.0,
            opponent_attack_damage: 1,
            ..quiet_config()
        };
        let mut session = MatchSession::new(config, 1);
        for i in 0..3 {
            session.observe(GestureType::RightPunch, i * 600);
        }
        assert_eq!(session.player_stats().combo, 3);

        session.observe(GestureType::Idle, 2_000);
        session.tick();
        assert_eq!(session.player_stats().combo, 0);

        for _ in 0..59 {
            session.tick();
        }
        let result = session.take_result().unwrap();
        assert_eq!(result.max_combo(), 3);
        assert_eq!(result.damage_dealt(), 300);
    }

    #[test]
    fn test_same_seed_same_match() {
        let play = |seed| {
            let mut session = MatchSession::new(Config::new(), seed);
            for i in 0..40u64 {
                session.observe(GestureType::RightPunch, i * 500);
                session.tick();
            }
            (session.player_stats(), session.opponent_health(), session.outcome())
        };
        assert_eq!(play(7), play(7));
    }
}
