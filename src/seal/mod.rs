//! Two-handed seal recognition.
//!
//! `detect_seal` is pure: the previous frame's analyses travel in a
//! [`DetectionMemory`] that the caller passes in and gets back. Use
//! [`SealClassifier`] to keep that memory for a single landmark stream.

mod decision;
pub mod geometry;
pub mod hand;
pub mod relationship;
pub mod scorers;

use thiserror::Error;

use crate::types::{HandPosition, Handedness, SealDetectionResult};

pub use self::{
    decision::decide,
    hand::{HandAnalysis, analyze_hand},
    relationship::{HandRelationship, analyze_relationship},
};

use self::relationship::find_hand;

#[derive(Debug, Error)]
pub enum SealError {
    #[error("both a left and a right hand are required")]
    HandsMissing,
    #[error("{} hand has unusable landmarks and no previous frame", .0.label())]
    NoUsableHand(Handedness),
}

/// The last successful frame's analyses, used to backfill corrupted frames
/// and to spot sudden jumps in hand distance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionMemory {
    pub left: Option<HandAnalysis>,
    pub right: Option<HandAnalysis>,
    pub relationship: Option<HandRelationship>,
}

impl DetectionMemory {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.relationship.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub result: SealDetectionResult,
    pub memory: DetectionMemory,
}

/// Classifies one frame.
///
/// Never fails: malformed frames and internal faults both come back as "no
/// seal" with the memory left as it was.
pub fn detect_seal(hands: &[HandPosition], memory: &DetectionMemory) -> Detection {
    if !is_two_hand_frame(hands) {
        return Detection {
            result: SealDetectionResult::none(),
            memory: memory.clone(),
        };
    }

    match classify_frame(hands, memory) {
        Ok(detection) => detection,
        Err(err) => {
            log::debug!("seal detection skipped frame: {err}");
            Detection {
                result: SealDetectionResult::none(),
                memory: memory.clone(),
            }
        }
    }
}

fn is_two_hand_frame(hands: &[HandPosition]) -> bool {
    if hands.len() != 2 {
        return false;
    }

    [Handedness::Left, Handedness::Right]
        .into_iter()
        .all(|side| find_hand(hands, side).is_some_and(|hand| !hand.landmarks.is_empty()))
}

fn classify_frame(
    hands: &[HandPosition],
    memory: &DetectionMemory,
) -> Result<Detection, SealError> {
    let left = analyze_side(hands, Handedness::Left, memory.left.as_ref())?;
    let right = analyze_side(hands, Handedness::Right, memory.right.as_ref())?;
    let relationship = analyze_relationship(hands, memory.relationship.as_ref())?;

    if relationship.possible_occlusion {
        log::debug!(
            "possible occlusion: wrist distance {:.3} (left fallback: {}, right fallback: {})",
            relationship.distance,
            left.is_fallback(),
            right.is_fallback()
        );
    }

    let result = decide(&left, &right, &relationship);

    Ok(Detection {
        result,
        memory: DetectionMemory {
            left: Some(left),
            right: Some(right),
            relationship: Some(relationship),
        },
    })
}

fn analyze_side(
    hands: &[HandPosition],
    side: Handedness,
    previous: Option<&HandAnalysis>,
) -> Result<HandAnalysis, SealError> {
    let hand = find_hand(hands, side).ok_or(SealError::HandsMissing)?;
    analyze_hand(&hand.landmarks, previous).ok_or(SealError::NoUsableHand(side))
}

/// Holds the detection memory for one sequential landmark stream.
#[derive(Debug, Default)]
pub struct SealClassifier {
    memory: DetectionMemory,
}

impl SealClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, hands: &[HandPosition]) -> SealDetectionResult {
        let detection = detect_seal(hands, &self.memory);
        self.memory = detection.memory;
        detection.result
    }

    pub fn memory(&self) -> &DetectionMemory {
        &self.memory
    }

    pub fn reset(&mut self) {
        self.memory = DetectionMemory::default();
    }
}
