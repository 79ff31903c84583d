//! Per-frame gesture classification from tracked hand landmarks.
//!
//! Landmarks follow the 21-point hand topology used by the tracker:
//! index 0 is the wrist, 8/12/16/20 are the index/middle/ring/pinky tips.

use glam::Vec2;

pub const WRIST: usize = 0;
pub const FINGERTIPS: [usize; 4] = [8, 12, 16, 20];
pub const LANDMARK_COUNT: usize = 21;

/// Which of the user's hands a landmark set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse a tracker category label ("Left" / "Right")
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Left" => Some(Handedness::Left),
            "Right" => Some(Handedness::Right),
            _ => None,
        }
    }
}

/// A hand reported by the tracker for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedHand {
    pub handedness: Handedness,
    pub landmarks: Vec<Vec2>,
}

impl TrackedHand {
    pub fn new(handedness: Handedness, landmarks: Vec<Vec2>) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }

    /// Mean fingertip-to-wrist distance, `None` if the landmark set is too short
    pub fn mean_fingertip_distance(&self) -> Option<f32> {
        mean_fingertip_distance(&self.landmarks)
    }

    pub fn shape(&self, fist_threshold: f32) -> Option<HandShape> {
        hand_shape(&self.landmarks, fist_threshold)
    }
}

/// Heuristic hand shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandShape {
    Open,
    Closed,
}

/// Classified action for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureType {
    #[default]
    Idle,
    LeftPunch,
    RightPunch,
    Block,
}

impl GestureType {
    pub fn is_punch(self) -> bool {
        matches!(self, GestureType::LeftPunch | GestureType::RightPunch)
    }

    /// Label shown in the "detected action" readout
    pub fn label(self) -> &'static str {
        match self {
            GestureType::Idle => "IDLE",
            GestureType::LeftPunch => "LEFT PUNCH",
            GestureType::RightPunch => "RIGHT PUNCH",
            GestureType::Block => "BLOCK",
        }
    }
}

/// Mean Euclidean distance from the four fingertips to the wrist
pub fn mean_fingertip_distance(landmarks: &[Vec2]) -> Option<f32> {
    let wrist = *landmarks.get(WRIST)?;
    let mut total = 0.0;
    for &tip in &FINGERTIPS {
        total += landmarks.get(tip)?.distance(wrist);
    }
    Some(total / FINGERTIPS.len() as f32)
}

/// A hand is closed when its fingertips sit, on average, closer to the
/// wrist than `fist_threshold`
pub fn hand_shape(landmarks: &[Vec2], fist_threshold: f32) -> Option<HandShape> {
    mean_fingertip_distance(landmarks).map(|d| {
        if d < fist_threshold {
            HandShape::Closed
        } else {
            HandShape::Open
        }
    })
}

/// Classify one frame of tracked hands.
///
/// Two visible hands always block, whether both are fists or both are open.
/// Otherwise a closed right hand wins over a closed left hand.
pub fn classify_gesture(hands: &[TrackedHand], fist_threshold: f32) -> GestureType {
    let mut left = None;
    let mut right = None;

    // Later reports with the same label replace earlier ones
    for hand in hands {
        let Some(shape) = hand.shape(fist_threshold) else {
            continue;
        };
        match hand.handedness {
            Handedness::Left => left = Some(shape),
            Handedness::Right => right = Some(shape),
        }
    }

    match (left, right) {
        (Some(HandShape::Closed), Some(HandShape::Closed)) => GestureType::Block,
        (Some(HandShape::Open), Some(HandShape::Open)) => GestureType::Block,
        (_, Some(HandShape::Closed)) => GestureType::RightPunch,
        (Some(HandShape::Closed), _) => GestureType::LeftPunch,
        _ => GestureType::Idle,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a synthetic hand whose four fingertips all sit `distance` away
    /// from a wrist at `origin`. Non-fingertip landmarks stay on the wrist.
    pub(crate) fn synthetic_landmarks(origin: Vec2, distance: f32) -> Vec<Vec2> {
        let mut landmarks = vec![origin; LANDMARK_COUNT];
        let dirs = [
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-0.6, -0.8),
        ];
        for (tip, dir) in FINGERTIPS.iter().zip(dirs) {
            landmarks[*tip] = origin + dir * distance;
        }
        landmarks
    }

    pub(crate) fn hand(handedness: Handedness, distance: f32) -> TrackedHand {
        TrackedHand::new(handedness, synthetic_landmarks(Vec2::new(0.5, 0.5), distance))
    }

    #[test]
    fn test_mean_distance_of_synthetic_hand() {
        for d in [0.1, 0.25, 0.4] {
            let mean = hand(Handedness::Right, d).mean_fingertip_distance().unwrap();
            assert!((mean - d).abs() < 1e-5, "expected {d}, got {mean}");
        }
    }

    #[test]
    fn test_fist_threshold_is_strict() {
        assert_eq!(
            hand(Handedness::Right, 0.1).shape(0.25),
            Some(HandShape::Closed)
        );
        // Exactly on the threshold counts as open
        let mut landmarks = vec![Vec2::ZERO; LANDMARK_COUNT];
        landmarks[8] = Vec2::new(0.25, 0.0);
        landmarks[12] = Vec2::new(0.0, 0.25);
        landmarks[16] = Vec2::new(-0.25, 0.0);
        landmarks[20] = Vec2::new(0.0, -0.25);
        let at_threshold = TrackedHand::new(Handedness::Right, landmarks);
        assert_eq!(at_threshold.shape(0.25), Some(HandShape::Open));
        assert_eq!(hand(Handedness::Right, 0.4).shape(0.25), Some(HandShape::Open));
    }

    #[test]
    fn test_scaling_landmarks_scales_distance() {
        for d in [0.1, 0.25, 0.4] {
            let base = synthetic_landmarks(Vec2::new(0.3, 0.6), d);
            let base_mean = mean_fingertip_distance(&base).unwrap();
            for k in [0.5, 2.0, 3.0] {
                let scaled: Vec<Vec2> = base.iter().map(|p| *p * k).collect();
                let scaled_mean = mean_fingertip_distance(&scaled).unwrap();
                assert!(
                    (scaled_mean - base_mean * k).abs() < 1e-4,
                    "scale {k} at distance {d}"
                );
            }
        }
    }

    #[test]
    fn test_scaling_can_cross_threshold() {
        // 0.2 is a fist, doubled to 0.4 it is not
        let base = synthetic_landmarks(Vec2::new(0.1, 0.1), 0.2);
        let doubled: Vec<Vec2> = base.iter().map(|p| *p * 2.0).collect();
        assert_eq!(hand_shape(&base, 0.25), Some(HandShape::Closed));
        assert_eq!(hand_shape(&doubled, 0.25), Some(HandShape::Open));
    }

    #[test]
    fn test_two_fists_block() {
        let hands = [hand(Handedness::Left, 0.1), hand(Handedness::Right, 0.1)];
        assert_eq!(classify_gesture(&hands, 0.25), GestureType::Block);
    }

    #[test]
    fn test_two_open_palms_block() {
        let hands = [hand(Handedness::Left, 0.4), hand(Handedness::Right, 0.4)];
        assert_eq!(classify_gesture(&hands, 0.25), GestureType::Block);
    }

    #[test]
    fn test_closed_right_hand_punches_right() {
        let hands = [hand(Handedness::Right, 0.1)];
        assert_eq!(classify_gesture(&hands, 0.25), GestureType::RightPunch);
    }

    #[test]
    fn test_closed_left_hand_punches_left() {
        let hands = [hand(Handedness::Left, 0.1)];
        assert_eq!(classify_gesture(&hands, 0.25), GestureType::LeftPunch);
    }

    #[test]
    fn test_mixed_hands_prefer_closed_one() {
        let right_fist = [hand(Handedness::Left, 0.4), hand(Handedness::Right, 0.1)];
        assert_eq!(classify_gesture(&right_fist, 0.25), GestureType::RightPunch);

        let left_fist = [hand(Handedness::Left, 0.1), hand(Handedness::Right, 0.4)];
        assert_eq!(classify_gesture(&left_fist, 0.25), GestureType::LeftPunch);
    }

    #[test]
    fn test_no_hands_or_single_open_hand_is_idle() {
        assert_eq!(classify_gesture(&[], 0.25), GestureType::Idle);
        assert_eq!(
            classify_gesture(&[hand(Handedness::Left, 0.4)], 0.25),
            GestureType::Idle
        );
    }

    #[test]
    fn test_truncated_hand_is_ignored() {
        let short = TrackedHand::new(Handedness::Right, vec![Vec2::ZERO; 10]);
        assert_eq!(short.mean_fingertip_distance(), None);
        assert_eq!(classify_gesture(&[short], 0.25), GestureType::Idle);
    }

    #[test]
    fn test_duplicate_label_uses_last_report() {
        let hands = [hand(Handedness::Right, 0.1), hand(Handedness::Right, 0.4)];
        assert_eq!(classify_gesture(&hands, 0.25), GestureType::Idle);
    }

    #[test]
    fn test_handedness_labels() {
        assert_eq!(Handedness::from_label("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::from_label("Right"), Some(Handedness::Right));
        assert_eq!(Handedness::from_label("left"), None);
    }
}
