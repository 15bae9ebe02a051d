pub mod jutsu;
pub mod pipeline;
pub mod seal;
pub mod types;

pub use seal::{Detection, DetectionMemory, SealClassifier, SealError, detect_seal};
pub use types::{HandPosition, Handedness, Landmark, Seal, SealDetectionResult};
