use crate::types::{
    INDEX_DIP, INDEX_MCP, INDEX_TIP, LANDMARK_COUNT, Landmark, MIDDLE_DIP, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_DIP, RING_MCP, RING_TIP, THUMB_TIP, WRIST,
};

use super::geometry::{CLOSE_THRESHOLD, FINGER_UP_MARGIN, close, finger_up};

const THUMB_PINKY_THRESHOLD: f32 = 0.08;
const ORIENTATION_MARGIN: f32 = 0.1;

/// Landmarks that must be finite for a frame to be analyzed at all.
const CRITICAL_LANDMARKS: [usize; 5] = [WRIST, THUMB_TIP, INDEX_TIP, MIDDLE_TIP, PINKY_TIP];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Orientation {
    pub is_vertical: bool,
    pub is_horizontal: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThumbPosition {
    pub is_up: bool,
    pub is_outside: bool,
    pub is_on_top: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerPositions {
    pub are_index_middle_together: bool,
    pub are_all_fingers_together: bool,
    pub are_fingers_straight: bool,
    pub is_index_up: bool,
    pub is_middle_up: bool,
    pub are_fingers_curled: bool,
    pub thumb_on_pinky: bool,
}

/// Orientation and finger features of the frame a fallback analysis was
/// copied from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandSnapshot {
    pub orientation: Orientation,
    pub fingers: FingerPositions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandAnalysis {
    pub orientation: Orientation,
    pub thumb: ThumbPosition,
    pub fingers: FingerPositions,
    /// Set only when this analysis is a stand-in for a frame whose critical
    /// landmarks were unusable.
    pub previous_state: Option<HandSnapshot>,
}

impl HandAnalysis {
    pub fn snapshot(&self) -> HandSnapshot {
        HandSnapshot {
            orientation: self.orientation,
            fingers: self.fingers,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.previous_state.is_some()
    }
}

/// Reduces one hand's landmarks to a feature vector.
///
/// When the critical landmarks are missing or non-finite the previous
/// analysis for the same hand is reused with `previous_state` attached.
/// Returns `None` only when there is nothing to fall back on.
pub fn analyze_hand(
    landmarks: &[Landmark],
    previous: Option<&HandAnalysis>,
) -> Option<HandAnalysis> {
    if !has_valid_landmarks(landmarks) {
        return previous.map(|prev| HandAnalysis {
            previous_state: Some(prev.snapshot()),
            ..*prev
        });
    }

    let wrist = landmarks[WRIST];
    let thumb_tip = landmarks[THUMB_TIP];
    let index_tip = landmarks[INDEX_TIP];
    let middle_tip = landmarks[MIDDLE_TIP];
    let ring_tip = landmarks[RING_TIP];
    let pinky_tip = landmarks[PINKY_TIP];

    let orientation = Orientation {
        is_vertical: finger_up(wrist, middle_tip, ORIENTATION_MARGIN),
        is_horizontal: (middle_tip.x - wrist.x).abs() > ORIENTATION_MARGIN,
    };

    let thumb = ThumbPosition {
        is_up: finger_up(wrist, thumb_tip, FINGER_UP_MARGIN),
        is_outside: (thumb_tip.x - wrist.x).abs() > (index_tip.x - wrist.x).abs(),
        is_on_top: thumb_tip.y < index_tip.y,
    };

    let is_index_up = finger_up(landmarks[INDEX_MCP], index_tip, FINGER_UP_MARGIN);
    let is_middle_up = finger_up(landmarks[MIDDLE_MCP], middle_tip, FINGER_UP_MARGIN);
    let is_ring_up = finger_up(landmarks[RING_MCP], ring_tip, FINGER_UP_MARGIN);
    let is_pinky_up = finger_up(landmarks[PINKY_MCP], pinky_tip, FINGER_UP_MARGIN);
    let are_index_middle_together = close(index_tip, middle_tip, CLOSE_THRESHOLD);

    let fingers = FingerPositions {
        are_index_middle_together,
        are_all_fingers_together: are_index_middle_together
            && close(middle_tip, ring_tip, CLOSE_THRESHOLD)
            && close(ring_tip, pinky_tip, CLOSE_THRESHOLD),
        are_fingers_straight: is_index_up && is_middle_up && is_ring_up && is_pinky_up,
        is_index_up,
        is_middle_up,
        are_fingers_curled: index_tip.y > landmarks[INDEX_DIP].y
            && middle_tip.y > landmarks[MIDDLE_DIP].y
            && ring_tip.y > landmarks[RING_DIP].y,
        thumb_on_pinky: close(thumb_tip, pinky_tip, THUMB_PINKY_THRESHOLD),
    };

    Some(HandAnalysis {
        orientation,
        thumb,
        fingers,
        previous_state: None,
    })
}

fn has_valid_landmarks(landmarks: &[Landmark]) -> bool {
    landmarks.len() >= LANDMARK_COUNT
        && CRITICAL_LANDMARKS
            .iter()
            .all(|&idx| landmarks[idx].is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seal::fixtures::open_hand;
    use crate::types::Handedness;

    #[test]
    fn open_hand_features() {
        let hand = open_hand((0.3, 0.8), Handedness::Left);
        let analysis = analyze_hand(&hand.landmarks, None).unwrap();

        assert!(analysis.orientation.is_vertical);
        assert!(!analysis.orientation.is_horizontal);
        assert!(analysis.thumb.is_up);
        assert!(analysis.thumb.is_outside);
        assert!(!analysis.thumb.is_on_top);
        assert!(analysis.fingers.are_fingers_straight);
        assert!(analysis.fingers.is_index_up);
        assert!(analysis.fingers.is_middle_up);
        assert!(!analysis.fingers.are_index_middle_together);
        assert!(!analysis.fingers.are_all_fingers_together);
        assert!(!analysis.fingers.are_fingers_curled);
        assert!(!analysis.fingers.thumb_on_pinky);
        assert!(analysis.previous_state.is_none());
    }

    #[test]
    fn orientation_tests_are_independent() {
        let mut hand = open_hand((0.3, 0.8), Handedness::Left);
        hand.landmarks[MIDDLE_TIP] = Landmark::new(0.5, 0.6);
        let analysis = analyze_hand(&hand.landmarks, None).unwrap();
        assert!(analysis.orientation.is_vertical);
        assert!(analysis.orientation.is_horizontal);
    }

    #[test]
    fn curled_fingers_point_down_past_their_last_joint() {
        let mut hand = open_hand((0.3, 0.8), Handedness::Left);
        let joints = [
            (INDEX_TIP, INDEX_DIP),
            (MIDDLE_TIP, MIDDLE_DIP),
            (RING_TIP, RING_DIP),
        ];
        for (tip, dip) in joints {
            let joint = hand.landmarks[dip];
            hand.landmarks[tip] = Landmark::new(joint.x, joint.y + 0.08);
        }
        let analysis = analyze_hand(&hand.landmarks, None).unwrap();
        assert!(analysis.fingers.are_fingers_curled);
        assert!(!analysis.fingers.are_fingers_straight);
    }

    #[test]
    fn thumb_on_pinky_uses_wider_tolerance() {
        let mut hand = open_hand((0.3, 0.8), Handedness::Left);
        let pinky = hand.landmarks[PINKY_TIP];
        hand.landmarks[THUMB_TIP] = Landmark::new(pinky.x + 0.07, pinky.y);
        let analysis = analyze_hand(&hand.landmarks, None).unwrap();
        assert!(analysis.fingers.thumb_on_pinky);
    }

    #[test]
    fn analysis_is_idempotent() {
        let hand = open_hand((0.6, 0.7), Handedness::Right);
        assert_eq!(
            analyze_hand(&hand.landmarks, None),
            analyze_hand(&hand.landmarks, None)
        );
    }

    #[test]
    fn corrupted_frame_falls_back_to_previous() {
        let hand = open_hand((0.3, 0.8), Handedness::Left);
        let first = analyze_hand(&hand.landmarks, None).unwrap();

        let mut corrupted = hand.clone();
        corrupted.landmarks[INDEX_TIP] = Landmark::new(f32::NAN, f32::NAN);
        let second = analyze_hand(&corrupted.landmarks, Some(&first)).unwrap();

        assert_eq!(second.previous_state, Some(first.snapshot()));
        assert_eq!(
            HandAnalysis {
                previous_state: None,
                ..second
            },
            first
        );
    }

    #[test]
    fn corrupted_frame_without_history_is_unusable() {
        let mut hand = open_hand((0.3, 0.8), Handedness::Left);
        hand.landmarks[WRIST] = Landmark::new(f32::INFINITY, 0.5);
        assert!(analyze_hand(&hand.landmarks, None).is_none());
        assert!(analyze_hand(&hand.landmarks[..10], None).is_none());
    }

    #[test]
    fn non_critical_nan_still_analyzes() {
        let mut hand = open_hand((0.3, 0.8), Handedness::Left);
        hand.landmarks[RING_TIP] = Landmark::new(f32::NAN, f32::NAN);
        let analysis = analyze_hand(&hand.landmarks, None).unwrap();
        assert!(!analysis.fingers.are_fingers_curled);
        assert!(!analysis.fingers.are_fingers_straight);
        assert!(analysis.previous_state.is_none());
    }
}
