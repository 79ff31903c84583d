//! Browser bindings
//!
//! `GestureFighter` is the object the host page talks to. It wires the
//! webcam, the hand tracker and the timers into an `App` and exposes the HUD
//! and result screen as JSON.

mod media;
mod timers;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use game_core::{Config, Outcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlVideoElement, MediaStream};

use crate::app::App;
use crate::camera::CameraLease;
use crate::commentary::{CommentaryProvider, JsCommentary};
use crate::error::ClientError;
use crate::fsm::{GameAction, GameFsm, Phase};
use crate::tracker::{HandLandmarker, HandTracker, TrackerService};

use media::{
    acquire_camera, alert, attach_video, detach_video, now_ms, video_ready, CAMERA_ALERT,
};
use timers::{AnimationLoop, Interval, Timeout};

#[wasm_bindgen(start)]
pub fn start_client() {
    console_error_panic_hook::set_once();
    crate::logging::init(log::LevelFilter::Info);
}

struct Inner {
    app: App<MediaStream>,
    video: HtmlVideoElement,
    tracker: Rc<TrackerService<HandLandmarker>>,
    tracker_factory: js_sys::Function,
    commentary: Rc<dyn CommentaryProvider>,
    start_delay: Option<Timeout>,
    clock: Option<Interval>,
    frames: Option<AnimationLoop>,
}

impl Inner {
    /// Stop every timer without dropping it. Safe inside a timer callback.
    fn halt(&mut self) {
        if let Some(timeout) = &self.start_delay {
            timeout.cancel();
        }
        if let Some(clock) = &self.clock {
            clock.cancel();
        }
        if let Some(frames) = &self.frames {
            frames.cancel();
        }
        detach_video(&self.video);
    }

    /// Stop and drop every timer. Only call from outside timer callbacks.
    fn teardown(&mut self) {
        self.halt();
        self.start_delay = None;
        self.clock = None;
        self.frames = None;
    }

    fn show_result(&mut self, outcome: Outcome) {
        self.halt();
        log::info!("Result screen: {}", outcome.label());
        let provider = self.commentary.clone();
        self.app.start_commentary(provider, |task| spawn_local(task));
    }
}

fn load_tracker(tracker: Rc<TrackerService<HandLandmarker>>, factory: js_sys::Function) {
    if tracker.get().is_some() || tracker.is_loading() {
        return;
    }
    spawn_local(async move {
        let loaded = tracker
            .get_or_init(|| async move {
                let created = factory
                    .call0(&JsValue::NULL)
                    .map_err(|e| ClientError::TrackerUnavailable(format!("{:?}", e)))?;
                let value = JsFuture::from(js_sys::Promise::resolve(&created))
                    .await
                    .map_err(|e| ClientError::TrackerUnavailable(format!("{:?}", e)))?;
                Ok(value.unchecked_into::<HandLandmarker>())
            })
            .await;
        if let Err(e) = loaded {
            log::warn!("{}", e);
        }
    });
}

fn on_frame(inner: &Rc<RefCell<Inner>>) {
    let mut inner = inner.borrow_mut();
    if !inner.app.is_playing() || !video_ready(&inner.video) {
        return;
    }
    let Some(tracker) = inner.tracker.get() else {
        return;
    };

    let now = now_ms();
    let hands = match tracker.detect(&inner.video, now) {
        Ok(hands) => hands,
        Err(e) => {
            log::debug!("Skipping frame: {}", e);
            return;
        }
    };
    if let Some(outcome) = inner.app.on_frame(&hands, now as u64) {
        inner.show_result(outcome);
    }
}

fn on_tick(inner: &Rc<RefCell<Inner>>) {
    let mut inner = inner.borrow_mut();
    if let Some(outcome) = inner.app.on_tick() {
        inner.show_result(outcome);
    }
}

/// Enter the fight: start the clock and ask for the camera
fn begin_match(inner: &Rc<RefCell<Inner>>, epoch: u32) -> Result<(), JsValue> {
    let weak = Rc::downgrade(inner);
    let (width, height, tick_ms) = {
        let inner = inner.borrow();
        let config = inner.app.config();
        (config.camera_width, config.camera_height, config.tick_ms)
    };

    let clock_owner = weak.clone();
    let clock = Interval::start(tick_ms, move || {
        if let Some(inner) = clock_owner.upgrade() {
            on_tick(&inner);
        }
    })?;
    inner.borrow_mut().clock = Some(clock);

    spawn_local(async move {
        let acquired = acquire_camera(width, height).await;
        let Some(inner) = weak.upgrade() else {
            if let Ok(stream) = acquired {
                CameraLease::new(stream).release();
            }
            return;
        };
        camera_ready(&inner, &weak, epoch, acquired);
    });
    Ok(())
}

fn camera_ready(
    inner: &Rc<RefCell<Inner>>,
    weak: &Weak<RefCell<Inner>>,
    epoch: u32,
    acquired: Result<MediaStream, ClientError>,
) {
    let mut guard = inner.borrow_mut();
    match acquired {
        Ok(stream) => {
            // Attach only once the match has accepted the stream
            if guard.app.attach_camera(epoch, stream.clone()).is_err() {
                return;
            }
            attach_video(&guard.video, &stream);
            let frame_owner = weak.clone();
            match AnimationLoop::start(move |_| {
                if let Some(inner) = frame_owner.upgrade() {
                    on_frame(&inner);
                }
            }) {
                Ok(frames) => guard.frames = Some(frames),
                Err(e) => log::error!("Could not start frame loop: {:?}", e),
            }
        }
        Err(e) => {
            if guard.app.epoch() != epoch {
                return;
            }
            guard.halt();
            guard.app.camera_failed(epoch, e);
            drop(guard);
            alert(CAMERA_ALERT);
        }
    }
}

fn random_seed() -> u64 {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (js_sys::Date::now() as u64).rotate_left(32) ^ noise
}

#[wasm_bindgen]
pub struct GestureFighter {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl GestureFighter {
    /// `tracker_factory: () => Promise<HandLandmarker>`,
    /// `commentary: (requestJson: string) => Promise<string>`,
    /// `config_json`: optional partial config override
    #[wasm_bindgen(constructor)]
    pub fn new(
        video: HtmlVideoElement,
        tracker_factory: js_sys::Function,
        commentary: js_sys::Function,
        config_json: Option<String>,
    ) -> Result<GestureFighter, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<Config>(&json).map_err(ClientError::from)?,
            None => Config::new(),
        };

        let inner = Inner {
            app: App::new(config, random_seed()),
            video,
            tracker: Rc::new(TrackerService::new()),
            tracker_factory,
            commentary: Rc::new(JsCommentary::new(commentary)),
            start_delay: None,
            clock: None,
            frames: None,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    /// Title screen start button
    pub fn start(&self) -> Result<(), JsValue> {
        let (epoch, delay, tracker, factory) = {
            let mut inner = self.inner.borrow_mut();
            let epoch = inner.app.request_start()?;
            inner.teardown();
            (
                epoch,
                inner.app.config().start_delay_ms,
                inner.tracker.clone(),
                inner.tracker_factory.clone(),
            )
        };
        load_tracker(tracker, factory);

        let weak = Rc::downgrade(&self.inner);
        let timeout = Timeout::start(delay, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let entered = inner.borrow_mut().app.finish_loading(epoch);
            match entered {
                Ok(epoch) => {
                    if let Err(e) = begin_match(&inner, epoch) {
                        log::error!("Could not start match: {:?}", e);
                    }
                }
                Err(e) => log::debug!("Start delay expired for abandoned load: {}", e),
            }
        })?;
        self.inner.borrow_mut().start_delay = Some(timeout);
        Ok(())
    }

    /// Rematch from the result screen
    pub fn restart(&self) -> Result<(), JsValue> {
        let epoch = {
            let mut inner = self.inner.borrow_mut();
            let epoch = inner.app.restart()?;
            inner.teardown();
            epoch
        };
        begin_match(&self.inner, epoch)
    }

    pub fn menu(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.teardown();
        inner.app.menu();
    }

    pub fn reload(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.teardown();
        inner.app.reload();
    }

    /// Apply a named action ("START", "RESTART", "MENU")
    pub fn dispatch(&self, action: &str) -> Result<(), JsValue> {
        match GameFsm::parse_action(action) {
            Some(GameAction::Start) => self.start(),
            Some(GameAction::Restart) => self.restart(),
            Some(GameAction::Menu) => {
                self.menu();
                Ok(())
            }
            Some(action @ (GameAction::Win | GameAction::Lose)) => {
                Err(ClientError::InvalidTransition {
                    phase: self.phase(),
                    action,
                }
                .into())
            }
            None => Err(JsValue::from_str(&format!("Unknown action: {}", action))),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> Phase {
        self.inner.borrow().app.phase()
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.inner.borrow().app.is_loading()
    }

    /// HUD state as JSON
    pub fn hud(&self) -> Result<String, JsValue> {
        let snapshot = self.inner.borrow().app.hud(now_ms() as u64);
        Ok(snapshot.to_json().map_err(ClientError::from)?)
    }

    /// Result screen as JSON, undefined outside a result screen
    pub fn result(&self) -> Result<Option<String>, JsValue> {
        let snapshot = self.inner.borrow_mut().app.result_snapshot();
        match snapshot {
            Some(snapshot) => Ok(Some(snapshot.to_json().map_err(ClientError::from)?)),
            None => Ok(None),
        }
    }
}
