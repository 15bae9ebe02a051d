use crate::types::{HandPosition, Handedness, INDEX_TIP, Landmark, THUMB_TIP, WRIST};

use super::{
    SealError,
    geometry::{CLOSE_THRESHOLD, close, distance},
};

const HANDS_TOGETHER_DISTANCE: f32 = 0.3;
const TRIANGLE_INDEX_SPREAD: f32 = 0.1;
const OCCLUSION_JUMP: f32 = 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandRelationship {
    pub distance: f32,
    pub vertical_alignment: f32,
    pub horizontal_alignment: f32,
    pub is_triangle_formation: bool,
    pub are_hands_together: bool,
    pub are_thumbs_together: bool,
    pub are_index_fingers_together: bool,
    pub possible_occlusion: bool,
    pub last_known_distance: f32,
}

/// Pairwise features of the left and right hand.
///
/// Both hands must be present; callers check this before classifying, so a
/// missing hand here is an internal fault.
pub fn analyze_relationship(
    hands: &[HandPosition],
    previous: Option<&HandRelationship>,
) -> Result<HandRelationship, SealError> {
    let left = find_hand(hands, Handedness::Left).ok_or(SealError::HandsMissing)?;
    let right = find_hand(hands, Handedness::Right).ok_or(SealError::HandsMissing)?;

    let left_wrist = point(left, WRIST);
    let right_wrist = point(right, WRIST);
    let left_thumb = point(left, THUMB_TIP);
    let right_thumb = point(right, THUMB_TIP);
    let left_index = point(left, INDEX_TIP);
    let right_index = point(right, INDEX_TIP);

    let mut wrist_distance = distance(left_wrist, right_wrist);
    let mut vertical_alignment = (left_wrist.y - right_wrist.y).abs();
    let mut horizontal_alignment = (left_wrist.x - right_wrist.x).abs();

    let possible_occlusion = match previous {
        Some(prev) if !wrist_distance.is_finite() => {
            // A wrist dropped out entirely; keep the last geometry we trust.
            wrist_distance = prev.last_known_distance;
            vertical_alignment = prev.vertical_alignment;
            horizontal_alignment = prev.horizontal_alignment;
            true
        }
        Some(prev) => (wrist_distance - prev.last_known_distance).abs() > OCCLUSION_JUMP,
        None => false,
    };

    let are_thumbs_together = close(left_thumb, right_thumb, CLOSE_THRESHOLD);

    Ok(HandRelationship {
        distance: wrist_distance,
        vertical_alignment,
        horizontal_alignment,
        is_triangle_formation: are_thumbs_together
            && (left_index.y - right_index.y).abs() > TRIANGLE_INDEX_SPREAD,
        are_hands_together: wrist_distance < HANDS_TOGETHER_DISTANCE,
        are_thumbs_together,
        are_index_fingers_together: close(left_index, right_index, CLOSE_THRESHOLD),
        possible_occlusion,
        last_known_distance: wrist_distance,
    })
}

pub(crate) fn find_hand(hands: &[HandPosition], handedness: Handedness) -> Option<&HandPosition> {
    hands.iter().find(|hand| hand.handedness == handedness)
}

fn point(hand: &HandPosition, idx: usize) -> Landmark {
    hand.landmarks
        .get(idx)
        .copied()
        .unwrap_or(Landmark::new(f32::NAN, f32::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seal::fixtures::{open_hand, pair};

    #[test]
    fn first_frame_never_reports_occlusion() {
        let hands = pair(
            open_hand((0.2, 0.8), Handedness::Left),
            open_hand((0.7, 0.8), Handedness::Right),
        );
        let rel = analyze_relationship(&hands, None).unwrap();

        assert!((rel.distance - 0.5).abs() < 1e-5);
        assert!((rel.horizontal_alignment - 0.5).abs() < 1e-5);
        assert!(rel.vertical_alignment.abs() < 1e-5);
        assert!(!rel.are_hands_together);
        assert!(!rel.possible_occlusion);
        assert_eq!(rel.last_known_distance, rel.distance);
    }

    #[test]
    fn distance_jump_flags_occlusion() {
        let near = pair(
            open_hand((0.4, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Right),
        );
        let far = pair(
            open_hand((0.1, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Right),
        );

        let first = analyze_relationship(&near, None).unwrap();
        assert!(first.are_hands_together);

        let steady = analyze_relationship(&near, Some(&first)).unwrap();
        assert!(!steady.possible_occlusion);

        let jumped = analyze_relationship(&far, Some(&first)).unwrap();
        assert!(jumped.possible_occlusion);
        assert!((jumped.last_known_distance - 0.5).abs() < 1e-5);
    }

    #[test]
    fn lost_wrist_keeps_previous_geometry() {
        let hands = pair(
            open_hand((0.4, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Right),
        );
        let first = analyze_relationship(&hands, None).unwrap();

        let mut lost = hands.clone();
        lost[1].landmarks[WRIST] = Landmark::new(f32::NAN, f32::NAN);
        let rel = analyze_relationship(&lost, Some(&first)).unwrap();

        assert!(rel.possible_occlusion);
        assert_eq!(rel.distance, first.distance);
        assert!(rel.are_hands_together);
    }

    #[test]
    fn joined_thumbs_with_spread_index_form_triangle() {
        let mut hands = pair(
            open_hand((0.4, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Right),
        );
        hands[0].landmarks[THUMB_TIP] = Landmark::new(0.5, 0.6);
        hands[1].landmarks[THUMB_TIP] = Landmark::new(0.52, 0.6);
        hands[0].landmarks[INDEX_TIP] = Landmark::new(0.45, 0.4);
        hands[1].landmarks[INDEX_TIP] = Landmark::new(0.55, 0.55);

        let rel = analyze_relationship(&hands, None).unwrap();
        assert!(rel.are_thumbs_together);
        assert!(rel.is_triangle_formation);
        assert!(!rel.are_index_fingers_together);
    }

    #[test]
    fn level_index_tips_are_not_a_triangle() {
        let mut hands = pair(
            open_hand((0.4, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Right),
        );
        hands[0].landmarks[THUMB_TIP] = Landmark::new(0.5, 0.6);
        hands[1].landmarks[THUMB_TIP] = Landmark::new(0.52, 0.6);

        let rel = analyze_relationship(&hands, None).unwrap();
        assert!(rel.are_thumbs_together);
        assert!(!rel.is_triangle_formation);
    }

    #[test]
    fn missing_hand_is_an_error() {
        let hands = vec![
            open_hand((0.4, 0.8), Handedness::Left),
            open_hand((0.6, 0.8), Handedness::Left),
        ];
        assert!(matches!(
            analyze_relationship(&hands, None),
            Err(SealError::HandsMissing)
        ));
    }
}
