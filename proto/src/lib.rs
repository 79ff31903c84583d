//! Data contracts between the game and its JavaScript host
//!
//! Everything crossing the boundary is JSON (serde_json): tracker results
//! come in, commentary requests and screen snapshots go out.

use serde::{Deserialize, Serialize};

// ============================================================================
// Hand tracker (inbound)
// ============================================================================

/// One landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Classification attached to a detected hand ("Left" / "Right")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub index: i32,
}

/// Result of one `detectForVideo` call. `landmarks[i]` and the i-th
/// handedness entry describe the same hand.
///
/// Newer tracker builds report `handednesses` and keep `handedness` as a
/// deprecated copy; either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarkerResult {
    #[serde(default)]
    pub landmarks: Vec<Vec<NormalizedLandmark>>,
    #[serde(default)]
    pub handedness: Vec<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handednesses: Vec<Vec<Category>>,
}

impl HandLandmarkerResult {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pair each landmark set with its top handedness label. Hands without a
    /// label are skipped.
    pub fn labeled_hands(&self) -> impl Iterator<Item = (&str, &[NormalizedLandmark])> {
        let labels = if self.handednesses.is_empty() {
            &self.handedness
        } else {
            &self.handednesses
        };
        labels
            .iter()
            .zip(self.landmarks.iter())
            .filter_map(|(categories, landmarks)| {
                categories
                    .first()
                    .map(|c| (c.category_name.as_str(), landmarks.as_slice()))
            })
    }
}

// ============================================================================
// Commentary (outbound)
// ============================================================================

/// Sent to the commentary capability when a match ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryRequest {
    pub victory: bool,
    pub time_elapsed: u32,
    pub damage_dealt: u32,
    pub final_health: u32,
    pub max_combo: u32,
    pub prompt: String,
}

impl CommentaryRequest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Screen snapshots (outbound)
// ============================================================================

/// Everything the match screen draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    pub phase: String,
    pub loading: bool,
    pub time_left: u32,
    pub player_health: u8,
    pub opponent_health: u8,
    pub score: u32,
    pub combo: u32,
    pub gesture: String,
    pub feedback: Option<String>,
    pub hit_flash: bool,
    pub error: Option<String>,
}

/// Everything the result screen draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub victory: bool,
    pub time_elapsed: u32,
    pub damage_dealt: u32,
    pub final_health: u32,
    pub max_combo: u32,
    pub commentary: String,
}

impl HudSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ResultSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
