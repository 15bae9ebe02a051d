use crate::types::Landmark;

pub const CLOSE_THRESHOLD: f32 = 0.05;
pub const FINGER_UP_MARGIN: f32 = 0.1;

/// Euclidean distance in the normalized image plane. Depth is ignored.
pub fn distance(a: Landmark, b: Landmark) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

pub fn close(a: Landmark, b: Landmark, threshold: f32) -> bool {
    distance(a, b) < threshold
}

/// True when `tip` sits more than `margin` above `base`.
pub fn finger_up(base: Landmark, tip: Landmark, margin: f32) -> bool {
    tip.y < base.y - margin
}
