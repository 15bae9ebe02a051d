use crate::types::{Seal, SealDetectionResult};

use super::{
    hand::HandAnalysis,
    relationship::HandRelationship,
    scorers::{self, SealScore},
};

/// Seals that are scored together, in priority order. The first seal whose
/// score clears the gate wins the whole frame.
struct Bucket {
    name: &'static str,
    seals: &'static [Seal],
    gate: f32,
}

const TRIANGLE: Bucket = Bucket {
    name: "triangle",
    seals: &[Seal::Bird, Seal::Horse],
    gate: 0.8,
};

// Lower gate: these lean on the occlusion rescue more than the others.
const SPECIAL: Bucket = Bucket {
    name: "special",
    seals: &[Seal::Monkey, Seal::Rat, Seal::Hare],
    gate: 0.7,
};

const VERTICAL: Bucket = Bucket {
    name: "vertical",
    seals: &[Seal::Boar, Seal::Serpent, Seal::Ram, Seal::Dragon, Seal::Tiger],
    gate: 0.8,
};

const MIXED: Bucket = Bucket {
    name: "mixed",
    seals: &[Seal::Dog, Seal::Ox],
    gate: 0.8,
};

impl Bucket {
    fn evaluate(
        &self,
        left: &HandAnalysis,
        right: &HandAnalysis,
        relationship: &HandRelationship,
    ) -> Option<SealDetectionResult> {
        self.seals.iter().find_map(|&seal| {
            let score = scorers::score(seal, left, right, relationship);
            if accepts(&score, self.gate) {
                log::trace!(
                    "{} bucket accepted {:?} at {:.2}{}",
                    self.name,
                    seal,
                    score.confidence,
                    if score.rescued { " (rescued)" } else { "" }
                );
                Some(SealDetectionResult {
                    seal: Some(seal),
                    confidence: score.confidence,
                })
            } else {
                None
            }
        })
    }
}

/// Rescued scores pass every gate, since the 0.7 rescue floor never clears a
/// strict gate of 0.7 or more. Such a result keeps `matches == false`.
fn accepts(score: &SealScore, gate: f32) -> bool {
    score.rescued || (score.matches && score.confidence > gate)
}

/// Walks the buckets in fixed order and returns the first confident seal.
pub fn decide(
    left: &HandAnalysis,
    right: &HandAnalysis,
    relationship: &HandRelationship,
) -> SealDetectionResult {
    let both_vertical = left.orientation.is_vertical && right.orientation.is_vertical;
    let mixed = left.orientation.is_vertical != right.orientation.is_vertical;

    let buckets = [
        (relationship.is_triangle_formation, &TRIANGLE),
        (true, &SPECIAL),
        (both_vertical, &VERTICAL),
        (mixed, &MIXED),
    ];

    buckets
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, bucket)| bucket.evaluate(left, right, relationship))
        .unwrap_or_else(SealDetectionResult::none)
}
