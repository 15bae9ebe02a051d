//! One confidence scorer per seal.
//!
//! Every scorer adds fixed weights for the sub-conditions that hold,
//! subtracts penalties for ones that must not hold, floors the total at zero
//! and reports a match above its own threshold. The weights are tuned
//! constants; keep them as they are.

use crate::types::Seal;

use super::{
    hand::{HandAnalysis, HandSnapshot},
    relationship::HandRelationship,
};

/// Confidence granted when a hand drops out mid-seal but held the seal's key
/// feature in the frame before.
pub const RESCUE_CONFIDENCE: f32 = 0.7;

const HORSE_CONFIDENCE: f32 = 0.85;

pub type Scorer = fn(&HandAnalysis, &HandAnalysis, &HandRelationship) -> SealScore;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SealScore {
    pub matches: bool,
    pub confidence: f32,
    /// Confidence was lifted by the occlusion rescue.
    pub rescued: bool,
}

impl SealScore {
    fn from_terms(terms: &[(bool, f32)], penalties: &[(bool, f32)], threshold: f32) -> Self {
        let gained: f32 = terms.iter().filter(|(held, _)| *held).map(|(_, w)| w).sum();
        let lost: f32 = penalties.iter().filter(|(held, _)| *held).map(|(_, w)| w).sum();
        let confidence = (gained - lost).clamp(0.0, 1.0);

        Self {
            matches: confidence > threshold,
            confidence,
            rescued: false,
        }
    }

    fn with_rescue(
        mut self,
        relationship: &HandRelationship,
        held_before: bool,
        threshold: f32,
    ) -> Self {
        if relationship.possible_occlusion && held_before && self.confidence < RESCUE_CONFIDENCE {
            self.confidence = RESCUE_CONFIDENCE;
            self.rescued = true;
            self.matches = self.confidence > threshold;
        }
        self
    }
}

pub fn threshold(seal: Seal) -> f32 {
    match seal {
        Seal::Bird => 0.8,
        Seal::Horse => 0.8,
        Seal::Monkey => 0.75,
        Seal::Rat => 0.8,
        Seal::Hare => 0.75,
        Seal::Boar => 0.85,
        Seal::Serpent => 0.8,
        Seal::Ram => 0.85,
        Seal::Dragon => 0.8,
        Seal::Tiger => 0.85,
        Seal::Dog => 0.8,
        Seal::Ox => 0.8,
    }
}

pub fn score(
    seal: Seal,
    left: &HandAnalysis,
    right: &HandAnalysis,
    relationship: &HandRelationship,
) -> SealScore {
    let scorer: Scorer = match seal {
        Seal::Bird => score_bird,
        Seal::Horse => score_horse,
        Seal::Monkey => score_monkey,
        Seal::Rat => score_rat,
        Seal::Hare => score_hare,
        Seal::Boar => score_boar,
        Seal::Serpent => score_serpent,
        Seal::Ram => score_ram,
        Seal::Dragon => score_dragon,
        Seal::Tiger => score_tiger,
        Seal::Dog => score_dog,
        Seal::Ox => score_ox,
    };
    scorer(left, right, relationship)
}

fn held_before(hand: &HandAnalysis, key: impl Fn(&HandSnapshot) -> bool) -> bool {
    hand.previous_state.as_ref().is_some_and(key)
}

pub fn score_bird(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (rel.is_triangle_formation, 0.4),
            (rel.are_thumbs_together, 0.2),
            (left.thumb.is_on_top, 0.2),
            (right.thumb.is_on_top, 0.2),
        ],
        &[],
        threshold(Seal::Bird),
    )
}

/// Horse is a fixed rule rather than a weighted score: a triangle with both
/// index fingers raised.
pub fn score_horse(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    let holds =
        rel.is_triangle_formation && left.fingers.is_index_up && right.fingers.is_index_up;
    SealScore {
        matches: holds,
        confidence: if holds { HORSE_CONFIDENCE } else { 0.0 },
        rescued: false,
    }
}

pub fn score_monkey(
    left: &HandAnalysis,
    right: &HandAnalysis,
    rel: &HandRelationship,
) -> SealScore {
    let threshold = threshold(Seal::Monkey);
    let key = |s: &HandSnapshot| s.fingers.are_all_fingers_together;

    SealScore::from_terms(
        &[
            (rel.are_hands_together, 0.3),
            (left.fingers.are_all_fingers_together, 0.2),
            (right.fingers.are_all_fingers_together, 0.2),
            (left.orientation.is_horizontal, 0.15),
            (right.orientation.is_horizontal, 0.15),
        ],
        &[],
        threshold,
    )
    .with_rescue(rel, held_before(left, key) || held_before(right, key), threshold)
}

pub fn score_rat(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    let threshold = threshold(Seal::Rat);

    SealScore::from_terms(
        &[
            (right.fingers.is_index_up, 0.2),
            (right.fingers.is_middle_up, 0.2),
            (right.fingers.are_index_middle_together, 0.2),
            (left.fingers.are_fingers_curled, 0.25),
            (rel.are_hands_together, 0.15),
        ],
        &[(right.fingers.are_fingers_curled, 0.3)],
        threshold,
    )
    .with_rescue(
        rel,
        held_before(right, |s| s.fingers.are_index_middle_together),
        threshold,
    )
}

pub fn score_hare(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (left.fingers.thumb_on_pinky, 0.35),
            (right.fingers.are_all_fingers_together, 0.25),
            (right.orientation.is_horizontal, 0.2),
            (rel.are_hands_together, 0.2),
        ],
        &[],
        threshold(Seal::Hare),
    )
}

pub fn score_boar(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (rel.are_hands_together, 0.3),
            (left.fingers.are_fingers_straight, 0.2),
            (right.fingers.are_fingers_straight, 0.2),
            (rel.are_index_fingers_together, 0.2),
            (rel.are_thumbs_together, 0.1),
        ],
        &[(rel.is_triangle_formation, 0.3)],
        threshold(Seal::Boar),
    )
}

pub fn score_serpent(
    left: &HandAnalysis,
    right: &HandAnalysis,
    rel: &HandRelationship,
) -> SealScore {
    let threshold = threshold(Seal::Serpent);
    let key = |s: &HandSnapshot| s.fingers.are_fingers_curled;

    SealScore::from_terms(
        &[
            (rel.are_hands_together, 0.3),
            (left.fingers.are_fingers_curled, 0.25),
            (right.fingers.are_fingers_curled, 0.25),
            (left.thumb.is_on_top, 0.2),
        ],
        &[],
        threshold,
    )
    .with_rescue(rel, held_before(left, key) || held_before(right, key), threshold)
}

pub fn score_ram(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (left.fingers.is_index_up, 0.15),
            (left.fingers.is_middle_up, 0.15),
            (right.fingers.is_index_up, 0.15),
            (right.fingers.is_middle_up, 0.15),
            (left.fingers.are_index_middle_together, 0.1),
            (right.fingers.are_index_middle_together, 0.1),
            (rel.are_hands_together, 0.2),
        ],
        &[(rel.is_triangle_formation, 0.2)],
        threshold(Seal::Ram),
    )
}

pub fn score_dragon(
    left: &HandAnalysis,
    right: &HandAnalysis,
    rel: &HandRelationship,
) -> SealScore {
    SealScore::from_terms(
        &[
            (left.thumb.is_up, 0.2),
            (right.thumb.is_up, 0.2),
            (rel.are_thumbs_together, 0.2),
            (left.fingers.are_fingers_curled, 0.2),
            (right.fingers.are_fingers_curled, 0.2),
        ],
        &[],
        threshold(Seal::Dragon),
    )
}

pub fn score_tiger(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (left.fingers.is_index_up, 0.15),
            (right.fingers.is_index_up, 0.15),
            (left.fingers.is_middle_up, 0.15),
            (right.fingers.is_middle_up, 0.15),
            (left.fingers.are_index_middle_together, 0.1),
            (right.fingers.are_index_middle_together, 0.1),
            (rel.are_thumbs_together, 0.2),
        ],
        &[],
        threshold(Seal::Tiger),
    )
}

pub fn score_dog(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (left.fingers.are_fingers_curled, 0.3),
            (right.orientation.is_horizontal, 0.25),
            (right.fingers.are_all_fingers_together, 0.25),
            (rel.are_hands_together, 0.2),
        ],
        &[],
        threshold(Seal::Dog),
    )
}

pub fn score_ox(left: &HandAnalysis, right: &HandAnalysis, rel: &HandRelationship) -> SealScore {
    SealScore::from_terms(
        &[
            (left.orientation.is_vertical, 0.2),
            (right.orientation.is_horizontal, 0.2),
            (left.fingers.is_index_up, 0.2),
            (right.thumb.is_outside, 0.2),
            (rel.are_hands_together, 0.2),
        ],
        &[(left.fingers.are_fingers_curled, 0.2)],
        threshold(Seal::Ox),
    )
}
