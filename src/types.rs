use std::time::Instant;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// A tracked point in normalized image space. Smaller `y` is higher in the
/// frame. Coordinates the tracker failed to produce are stored as NaN.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandPosition {
    pub landmarks: Vec<Landmark>,
    pub handedness: Handedness,
}

/// The closed catalogue of two-handed seals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Seal {
    Rat,
    Ox,
    Tiger,
    Hare,
    Dragon,
    Serpent,
    Horse,
    Ram,
    Monkey,
    Bird,
    Dog,
    Boar,
}

impl Seal {
    pub const ALL: [Seal; 12] = [
        Seal::Rat,
        Seal::Ox,
        Seal::Tiger,
        Seal::Hare,
        Seal::Dragon,
        Seal::Serpent,
        Seal::Horse,
        Seal::Ram,
        Seal::Monkey,
        Seal::Bird,
        Seal::Dog,
        Seal::Boar,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Seal::Rat => "Rat",
            Seal::Ox => "Ox",
            Seal::Tiger => "Tiger",
            Seal::Hare => "Hare",
            Seal::Dragon => "Dragon",
            Seal::Serpent => "Serpent",
            Seal::Horse => "Horse",
            Seal::Ram => "Ram",
            Seal::Monkey => "Monkey",
            Seal::Bird => "Bird",
            Seal::Dog => "Dog",
            Seal::Boar => "Boar",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Seal::Rat => "子",
            Seal::Ox => "丑",
            Seal::Tiger => "寅",
            Seal::Hare => "卯",
            Seal::Dragon => "辰",
            Seal::Serpent => "巳",
            Seal::Horse => "午",
            Seal::Ram => "未",
            Seal::Monkey => "申",
            Seal::Bird => "酉",
            Seal::Dog => "戌",
            Seal::Boar => "亥",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SealDetectionResult {
    pub seal: Option<Seal>,
    pub confidence: f32,
}

impl SealDetectionResult {
    pub fn none() -> Self {
        Self {
            seal: None,
            confidence: 0.0,
        }
    }

    pub fn display_text(&self) -> String {
        match self.seal {
            Some(seal) => format!(
                "{} {} ({:.0}%)",
                seal.glyph(),
                seal.display_name(),
                self.confidence * 100.0
            ),
            None => "no seal".to_string(),
        }
    }
}

/// One frame of tracker output: zero or more labelled hands.
#[derive(Clone, Debug)]
pub struct LandmarkFrame {
    pub hands: Vec<HandPosition>,
    pub timestamp: Instant,
}

#[derive(Clone, Debug)]
pub struct RecognizedFrame {
    pub timestamp: Instant,
    pub result: SealDetectionResult,
}
