//! Hand tracking service
//!
//! The tracking model is expensive to create, so it is built once on first
//! use and shared afterwards. `get_or_init` does the one-time setup,
//! `get` is the cheap per-frame accessor.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use game_core::{Handedness, TrackedHand};
use glam::Vec2;
use proto::HandLandmarkerResult;

use crate::error::ClientError;

/// External hand tracker: one video frame in, zero or more hands out
pub trait HandTracker {
    type Frame;

    fn detect(&self, frame: &Self::Frame, timestamp_ms: f64)
        -> Result<Vec<TrackedHand>, ClientError>;
}

enum Slot<T> {
    Empty,
    Loading,
    Ready(Rc<T>),
}

/// Initialize-once holder for a tracker instance
pub struct TrackerService<T> {
    slot: RefCell<Slot<T>>,
}

impl<T> TrackerService<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(Slot::Empty),
        }
    }

    /// The tracker, if it has finished loading
    pub fn get(&self) -> Option<Rc<T>> {
        match &*self.slot.borrow() {
            Slot::Ready(tracker) => Some(tracker.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Loading)
    }

    /// Return the tracker, creating it with `init` on first use.
    ///
    /// A second caller arriving while the first is still loading gets
    /// `TrackerLoading` rather than a second model. A failed load leaves the
    /// service empty so the next call can try again.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Rc<T>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        {
            let mut slot = self.slot.borrow_mut();
            match &*slot {
                Slot::Ready(tracker) => return Ok(tracker.clone()),
                Slot::Loading => return Err(ClientError::TrackerLoading),
                Slot::Empty => *slot = Slot::Loading,
            }
        }

        match init().await {
            Ok(tracker) => {
                let tracker = Rc::new(tracker);
                *self.slot.borrow_mut() = Slot::Ready(tracker.clone());
                log::info!("Hand tracker ready");
                Ok(tracker)
            }
            Err(e) => {
                *self.slot.borrow_mut() = Slot::Empty;
                log::warn!("Hand tracker failed to load: {}", e);
                Err(e)
            }
        }
    }
}

impl<T> Default for TrackerService<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a tracker result into labeled hands. Unknown labels are dropped.
pub fn hands_from_result(result: &HandLandmarkerResult) -> Vec<TrackedHand> {
    result
        .labeled_hands()
        .filter_map(|(label, landmarks)| {
            let handedness = Handedness::from_label(label)?;
            let points = landmarks.iter().map(|p| Vec2::new(p.x, p.y)).collect();
            Some(TrackedHand::new(handedness, points))
        })
        .collect()
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlVideoElement;

    #[wasm_bindgen]
    extern "C" {
        /// MediaPipe `HandLandmarker` created by the host page
        pub type HandLandmarker;

        #[wasm_bindgen(method, catch, js_name = detectForVideo)]
        fn detect_for_video(
            this: &HandLandmarker,
            video: &HtmlVideoElement,
            timestamp: f64,
        ) -> Result<JsValue, JsValue>;
    }

    impl HandTracker for HandLandmarker {
        type Frame = HtmlVideoElement;

        fn detect(
            &self,
            frame: &HtmlVideoElement,
            timestamp_ms: f64,
        ) -> Result<Vec<TrackedHand>, ClientError> {
            let raw = self
                .detect_for_video(frame, timestamp_ms)
                .map_err(|e| ClientError::Tracking(format!("{:?}", e)))?;
            let json: String = js_sys::JSON::stringify(&raw)
                .map_err(|e| ClientError::Decode(format!("{:?}", e)))?
                .into();
            let result = HandLandmarkerResult::from_json(&json)?;
            Ok(hands_from_result(&result))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::HandLandmarker;
