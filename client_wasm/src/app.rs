//! Browser-independent application state
//!
//! `App` owns the lifecycle state machine, the running match, the camera
//! lease and the result screen. The browser layer drives it with frames,
//! clock ticks and user actions; everything here is plain Rust so it can be
//! tested without a browser.

use std::rc::Rc;

use game_core::{classify_gesture, Config, MatchResult, MatchSession, Outcome, TrackedHand};
use proto::{HudSnapshot, ResultSnapshot};

use crate::camera::{CameraLease, CameraStream};
use crate::commentary::{CommentaryProvider, CommentaryTask, LocalFuture};
use crate::error::ClientError;
use crate::fsm::{GameAction, GameFsm, Phase};

pub struct App<S: CameraStream> {
    fsm: GameFsm,
    config: Config,
    session: Option<MatchSession>,
    result: Option<MatchResult>,
    commentary: Option<CommentaryTask>,
    camera: Option<CameraLease<S>>,
    loading: bool,
    fatal: Option<ClientError>,
    /// Bumped whenever the current match (or its loading) is abandoned
    epoch: u32,
    seed: u64,
    matches_started: u64,
}

impl<S: CameraStream> App<S> {
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            fsm: GameFsm::new(),
            config: config.normalized(),
            session: None,
            result: None,
            commentary: None,
            camera: None,
            loading: false,
            fatal: None,
            epoch: 0,
            seed,
            matches_started: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_playing(&self) -> bool {
        self.fsm.is_playing() && self.session.is_some()
    }

    pub fn has_camera(&self) -> bool {
        self.camera.is_some()
    }

    pub fn fatal(&self) -> Option<&ClientError> {
        self.fatal.as_ref()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Begin the start delay from the title screen. Returns the epoch the
    /// delayed `finish_loading` must present.
    pub fn request_start(&mut self) -> Result<u32, ClientError> {
        if let Some(fatal) = &self.fatal {
            return Err(fatal.clone());
        }
        if self.loading {
            return Err(ClientError::AlreadyLoading);
        }
        if !self.fsm.can_transition(GameAction::Start) {
            return Err(ClientError::InvalidTransition {
                phase: self.fsm.phase(),
                action: GameAction::Start,
            });
        }

        self.loading = true;
        self.epoch = self.epoch.wrapping_add(1);
        log::debug!("Loading match (epoch {})", self.epoch);
        Ok(self.epoch)
    }

    /// End of the start delay: enter the fight
    pub fn finish_loading(&mut self, epoch: u32) -> Result<u32, ClientError> {
        if !self.loading || epoch != self.epoch {
            return Err(ClientError::InvalidTransition {
                phase: self.fsm.phase(),
                action: GameAction::Start,
            });
        }
        self.loading = false;

        let transition = self.fsm.transition(GameAction::Start);
        if !transition.success() {
            return Err(ClientError::InvalidTransition {
                phase: transition.from_phase(),
                action: GameAction::Start,
            });
        }
        self.begin_session();
        Ok(self.epoch)
    }

    /// Rematch from a result screen
    pub fn restart(&mut self) -> Result<u32, ClientError> {
        if let Some(fatal) = &self.fatal {
            return Err(fatal.clone());
        }
        let transition = self.fsm.transition(GameAction::Restart);
        if !transition.success() {
            return Err(ClientError::InvalidTransition {
                phase: transition.from_phase(),
                action: GameAction::Restart,
            });
        }

        self.commentary = None;
        self.result = None;
        self.epoch = self.epoch.wrapping_add(1);
        self.begin_session();
        Ok(self.epoch)
    }

    /// Back to the title screen, discarding all match state
    pub fn menu(&mut self) {
        self.fsm.transition(GameAction::Menu);
        self.discard_match();
        log::debug!("Back to title");
    }

    /// Full reset, the only way out of a camera failure
    pub fn reload(&mut self) {
        self.fsm.reset();
        self.discard_match();
        self.fatal = None;
        log::info!("App reloaded");
    }

    /// Hand over a freshly acquired camera stream.
    ///
    /// The stream is stopped right away if the match it was requested for is
    /// no longer running.
    pub fn attach_camera(&mut self, epoch: u32, stream: S) -> Result<(), ClientError> {
        let lease = CameraLease::new(stream);
        if epoch != self.epoch || !self.is_playing() {
            log::debug!("Camera for epoch {} arrived late, releasing", epoch);
            lease.release();
            return Err(ClientError::StaleCamera);
        }
        self.camera = Some(lease);
        Ok(())
    }

    /// Camera acquisition failed. Locks the app until `reload`.
    pub fn camera_failed(&mut self, epoch: u32, error: ClientError) {
        if epoch != self.epoch {
            log::debug!("Ignoring camera failure for abandoned epoch {}", epoch);
            return;
        }
        log::error!("{}", error);
        self.fsm.reset();
        self.discard_match();
        self.fatal = Some(error);
    }

    /// Classify one video frame and feed it to the match
    pub fn on_frame(&mut self, hands: &[TrackedHand], now_ms: u64) -> Option<Outcome> {
        if !self.fsm.is_playing() {
            return None;
        }
        let session = self.session.as_mut()?;
        let gesture = classify_gesture(hands, self.config.fist_threshold);
        session.observe(gesture, now_ms);
        self.end_match()
    }

    /// One second of match time
    pub fn on_tick(&mut self) -> Option<Outcome> {
        if !self.fsm.is_playing() {
            return None;
        }
        self.session.as_mut()?.tick();
        self.end_match()
    }

    /// Start fetching commentary for the result on screen. Does nothing when
    /// there is no result, a request is already running or the line is in.
    pub fn start_commentary<F>(&mut self, provider: Rc<dyn CommentaryProvider>, spawn: F)
    where
        F: FnOnce(LocalFuture<()>),
    {
        if self.commentary.is_some() {
            return;
        }
        if let Some(result) = &self.result {
            if result.commentary().is_none() {
                self.commentary = Some(CommentaryTask::start(provider, result, spawn));
            }
        }
    }

    /// Move a finished commentary line onto the match result
    pub fn settle_commentary(&mut self) -> bool {
        let Some(line) = self.commentary.as_ref().and_then(CommentaryTask::line) else {
            return false;
        };
        self.commentary = None;
        self.result = self.result.take().map(|result| result.with_commentary(line));
        true
    }

    pub fn commentary_text(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        if let Some(line) = result.commentary() {
            return Some(line.to_string());
        }
        Some(match &self.commentary {
            Some(task) => task.text(),
            None => game_core::commentary::PLACEHOLDER.to_string(),
        })
    }

    pub fn hud(&self, now_ms: u64) -> HudSnapshot {
        let error = self.fatal.as_ref().map(|e| e.to_string());
        let phase = self.fsm.phase().as_str().to_string();

        match &self.session {
            Some(session) => {
                let stats = session.player_stats();
                HudSnapshot {
                    phase,
                    loading: self.loading,
                    time_left: session.time_left(),
                    player_health: session.player_health().percent(),
                    opponent_health: session.opponent_health().percent(),
                    score: stats.score,
                    combo: stats.combo,
                    gesture: session.gesture().label().to_string(),
                    feedback: session.feedback().text().map(str::to_string),
                    hit_flash: session.feedback().flash_active(now_ms),
                    error,
                }
            }
            None => HudSnapshot {
                phase,
                loading: self.loading,
                time_left: self.config.match_seconds,
                player_health: 100,
                opponent_health: 100,
                score: 0,
                combo: 0,
                gesture: game_core::GestureType::Idle.label().to_string(),
                feedback: None,
                hit_flash: false,
                error,
            },
        }
    }

    pub fn result_snapshot(&mut self) -> Option<ResultSnapshot> {
        self.settle_commentary();
        let result = self.result.as_ref()?;
        Some(ResultSnapshot {
            victory: result.outcome().is_victory(),
            time_elapsed: result.time_elapsed(),
            damage_dealt: result.damage_dealt(),
            final_health: result.final_health(),
            max_combo: result.max_combo(),
            commentary: self.commentary_text().unwrap_or_default(),
        })
    }

    fn begin_session(&mut self) {
        let seed = self.seed.wrapping_add(self.matches_started);
        self.matches_started += 1;
        self.session = Some(MatchSession::new(self.config.clone(), seed));
        log::info!("Match started (seed {})", seed);
    }

    /// Move a finished match onto the result screen
    fn end_match(&mut self) -> Option<Outcome> {
        let result = self.session.as_mut()?.take_result()?;
        let outcome = result.outcome();
        let action = match outcome {
            Outcome::Victory => GameAction::Win,
            Outcome::Defeat => GameAction::Lose,
        };
        self.fsm.transition(action);

        self.session = None;
        self.camera = None;
        self.commentary = None;
        self.result = Some(result);
        Some(outcome)
    }

    fn discard_match(&mut self) {
        self.session = None;
        self.result = None;
        self.commentary = None;
        self.camera = None;
        self.loading = false;
        self.epoch = self.epoch.wrapping_add(1);
    }
}
