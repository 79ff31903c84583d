//! Webcam access through `getUserMedia`

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints};

use crate::error::ClientError;

pub const CAMERA_ALERT: &str = "Could not access webcam. Please allow camera permissions.";

fn camera_error(e: JsValue) -> ClientError {
    let reason = js_sys::Reflect::get(&e, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    ClientError::CameraUnavailable(reason)
}

/// Ask for the camera at `width`x`height`
pub async fn acquire_camera(width: u32, height: u32) -> Result<MediaStream, ClientError> {
    let window = web_sys::window()
        .ok_or_else(|| ClientError::CameraUnavailable("no window".to_string()))?;
    let devices = window.navigator().media_devices().map_err(camera_error)?;

    let video_constraints = js_sys::Object::new();
    js_sys::Reflect::set(
        &video_constraints,
        &JsValue::from_str("width"),
        &JsValue::from(width),
    )
    .map_err(camera_error)?;
    js_sys::Reflect::set(
        &video_constraints,
        &JsValue::from_str("height"),
        &JsValue::from(height),
    )
    .map_err(camera_error)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints.into());
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(camera_error)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(camera_error)?
        .dyn_into()
        .map_err(camera_error)?;
    Ok(stream)
}

/// Show `stream` in `video` and start playback in the background
pub fn attach_video(video: &HtmlVideoElement, stream: &MediaStream) {
    video.set_src_object(Some(stream));
    match video.play() {
        Ok(playing) => spawn_local(async move {
            if let Err(e) = JsFuture::from(playing).await {
                log::warn!("Video playback did not start: {:?}", e);
            }
        }),
        Err(e) => log::warn!("Video playback did not start: {:?}", e),
    }
}

/// Frames are only worth tracking while the video is actually playing
pub fn video_ready(video: &HtmlVideoElement) -> bool {
    video.current_time() > 0.0 && !video.paused() && !video.ended()
}

pub fn detach_video(video: &HtmlVideoElement) {
    video.set_src_object(None);
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// High resolution timestamp in milliseconds
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
