//! Webcam ownership
//!
//! A match holds the camera through a `CameraLease`. Dropping the lease stops
//! every track, so the camera light goes off on any way out of the match.

/// A live camera stream that can be shut down
pub trait CameraStream {
    fn stop_all(&self);
}

/// Exclusive hold on a camera stream for the length of one match
pub struct CameraLease<S: CameraStream> {
    stream: Option<S>,
}

impl<S: CameraStream> CameraLease<S> {
    pub fn new(stream: S) -> Self {
        log::info!("Camera acquired");
        Self {
            stream: Some(stream),
        }
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Stop the stream now instead of at drop
    pub fn release(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_all();
            log::info!("Camera released");
        }
    }
}

impl<S: CameraStream> Drop for CameraLease<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(target_arch = "wasm32")]
impl CameraStream for web_sys::MediaStream {
    fn stop_all(&self) {
        use wasm_bindgen::JsCast;

        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}
