pub mod confirm;
pub mod recognizer;
pub mod source;

pub use confirm::{ConfirmConfig, SealSequence};
pub use recognizer::start_recognizer;
pub use source::{parse_frame, start_landmark_reader};

/// How frames travel from the landmark source to the recognizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delivery {
    /// Every frame is classified, in order. Used for recordings.
    #[default]
    Sequential,
    /// Stale frames are dropped so a live feed never falls behind.
    LatestOnly,
}
