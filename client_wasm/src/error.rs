//! Client error type

use std::fmt;

use crate::fsm::{GameAction, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// getUserMedia refused or unavailable
    CameraUnavailable(String),
    /// Camera arrived after the match it was requested for ended
    StaleCamera,
    /// Hand tracker could not be created
    TrackerUnavailable(String),
    /// Another caller is already creating the hand tracker
    TrackerLoading,
    /// Hand tracker call failed for one frame
    Tracking(String),
    Commentary(String),
    Decode(String),
    InvalidTransition { phase: Phase, action: GameAction },
    /// Still waiting on the start delay
    AlreadyLoading,
}

impl ClientError {
    /// Errors that lock the app until a full reload
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClientError::CameraUnavailable(_))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::CameraUnavailable(reason) => {
                write!(f, "Could not access webcam: {}", reason)
            }
            ClientError::StaleCamera => write!(f, "Camera arrived after the match ended"),
            ClientError::TrackerUnavailable(reason) => {
                write!(f, "Hand tracker unavailable: {}", reason)
            }
            ClientError::TrackerLoading => write!(f, "Hand tracker is still loading"),
            ClientError::Tracking(reason) => write!(f, "Hand tracking failed: {}", reason),
            ClientError::Commentary(reason) => write!(f, "Commentary failed: {}", reason),
            ClientError::Decode(reason) => write!(f, "Failed to decode: {}", reason),
            ClientError::InvalidTransition { phase, action } => {
                write!(f, "Cannot {:?} from {}", action, phase.as_str())
            }
            ClientError::AlreadyLoading => write!(f, "Match is already loading"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ClientError> for wasm_bindgen::JsValue {
    fn from(e: ClientError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
