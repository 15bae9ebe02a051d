use std::time::{Duration, Instant};

use crate::types::{Seal, SealDetectionResult};

const DEFAULT_HOLD: Duration = Duration::from_millis(1_000);
const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfirmConfig {
    /// How long a seal must be held before it joins the sequence.
    pub hold: Duration,
    pub min_confidence: f32,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            hold: DEFAULT_HOLD,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Turns per-frame detections into a sequence of confirmed seals.
///
/// A seal is confirmed once it has been detected above `min_confidence` for
/// `hold` without interruption. Holding it longer does not confirm it again;
/// the hands have to release it or move on to another seal first.
#[derive(Debug)]
pub struct SealSequence {
    config: ConfirmConfig,
    pending: Option<(Seal, Instant)>,
    latched: Option<Seal>,
    seals: Vec<Seal>,
}

impl SealSequence {
    pub fn new(config: ConfirmConfig) -> Self {
        Self {
            config,
            pending: None,
            latched: None,
            seals: Vec::new(),
        }
    }

    /// Feeds one frame's result. Returns the seal if this frame confirmed it.
    pub fn update(&mut self, result: &SealDetectionResult, now: Instant) -> Option<Seal> {
        let seal = match result.seal {
            Some(seal) if result.confidence >= self.config.min_confidence => seal,
            _ => {
                self.pending = None;
                self.latched = None;
                return None;
            }
        };

        let since = match self.pending {
            Some((pending, since)) if pending == seal => since,
            _ => {
                self.pending = Some((seal, now));
                now
            }
        };

        if self.latched == Some(seal) || now.duration_since(since) < self.config.hold {
            return None;
        }

        self.latched = Some(seal);
        self.seals.push(seal);
        log::info!(
            "confirmed seal {} ({} in sequence)",
            seal.display_name(),
            self.seals.len()
        );
        Some(seal)
    }

    pub fn seals(&self) -> &[Seal] {
        &self.seals
    }

    pub fn reset(&mut self) {
        self.pending = None;
        self.latched = None;
        self.seals.clear();
    }
}

impl Default for SealSequence {
    fn default() -> Self {
        Self::new(ConfirmConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected(seal: Seal, confidence: f32) -> SealDetectionResult {
        SealDetectionResult {
            seal: Some(seal),
            confidence,
        }
    }

    fn at(origin: Instant, ms: u64) -> Instant {
        origin + Duration::from_millis(ms)
    }

    #[test]
    fn seal_confirms_after_hold() {
        let t0 = Instant::now();
        let mut sequence = SealSequence::default();

        assert_eq!(sequence.update(&detected(Seal::Ram, 0.9), t0), None);
        assert_eq!(sequence.update(&detected(Seal::Ram, 0.9), at(t0, 500)), None);
        assert_eq!(
            sequence.update(&detected(Seal::Ram, 0.9), at(t0, 1_000)),
            Some(Seal::Ram)
        );
        assert_eq!(sequence.update(&detected(Seal::Ram, 0.9), at(t0, 2_500)), None);
        assert_eq!(sequence.seals(), &[Seal::Ram]);
    }

    #[test]
    fn low_confidence_restarts_the_timer() {
        let t0 = Instant::now();
        let mut sequence = SealSequence::default();

        sequence.update(&detected(Seal::Tiger, 0.9), t0);
        sequence.update(&detected(Seal::Tiger, 0.7), at(t0, 600));
        assert_eq!(sequence.update(&detected(Seal::Tiger, 0.9), at(t0, 1_200)), None);
        assert_eq!(
            sequence.update(&detected(Seal::Tiger, 0.9), at(t0, 2_200)),
            Some(Seal::Tiger)
        );
    }

    #[test]
    fn switching_seal_restarts_the_timer() {
        let t0 = Instant::now();
        let mut sequence = SealSequence::default();

        sequence.update(&detected(Seal::Ram, 0.9), t0);
        sequence.update(&detected(Seal::Serpent, 0.9), at(t0, 800));
        assert_eq!(sequence.update(&detected(Seal::Serpent, 0.9), at(t0, 1_200)), None);
        assert_eq!(
            sequence.update(&detected(Seal::Serpent, 0.9), at(t0, 1_800)),
            Some(Seal::Serpent)
        );
        assert_eq!(sequence.seals(), &[Seal::Serpent]);
    }

    #[test]
    fn released_seal_can_repeat() {
        let t0 = Instant::now();
        let mut sequence = SealSequence::default();

        sequence.update(&detected(Seal::Tiger, 0.9), t0);
        sequence.update(&detected(Seal::Tiger, 0.9), at(t0, 1_000));
        sequence.update(&SealDetectionResult::none(), at(t0, 1_100));
        sequence.update(&detected(Seal::Tiger, 0.9), at(t0, 1_200));
        sequence.update(&detected(Seal::Tiger, 0.9), at(t0, 2_200));

        assert_eq!(sequence.seals(), &[Seal::Tiger, Seal::Tiger]);
    }

    #[test]
    fn reset_clears_everything() {
        let t0 = Instant::now();
        let mut sequence = SealSequence::new(ConfirmConfig {
            hold: Duration::ZERO,
            min_confidence: 0.5,
        });

        assert_eq!(sequence.update(&detected(Seal::Dog, 0.6), t0), Some(Seal::Dog));
        sequence.reset();
        assert!(sequence.seals().is_empty());
        assert_eq!(sequence.update(&detected(Seal::Dog, 0.6), t0), Some(Seal::Dog));
    }
}
