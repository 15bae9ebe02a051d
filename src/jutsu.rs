//! Static table of jutsu and the seal sequences that perform them. Display
//! only; the recognizer never reads it.

use crate::types::Seal::{self, *};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jutsu {
    pub name: &'static str,
    pub seals: &'static [Seal],
}

pub const CATALOGUE: &[Jutsu] = &[
    Jutsu {
        name: "Fire Style: Fireball Jutsu",
        seals: &[Serpent, Ram, Monkey, Boar, Horse, Tiger],
    },
    Jutsu {
        name: "Fire Style: Phoenix Sage Fire",
        seals: &[Rat, Tiger, Dog, Ox, Hare, Tiger],
    },
    Jutsu {
        name: "Fire Style: Dragon Flame",
        seals: &[Serpent, Dragon, Hare, Tiger],
    },
    Jutsu {
        name: "Shadow Clone Jutsu",
        seals: &[Ram, Serpent, Tiger],
    },
    Jutsu {
        name: "Chidori",
        seals: &[Ox, Hare, Monkey],
    },
    Jutsu {
        name: "Summoning Jutsu",
        seals: &[Boar, Dog, Bird, Monkey, Ram],
    },
    Jutsu {
        name: "Substitution Jutsu",
        seals: &[Ram, Boar, Ox, Dog, Serpent],
    },
    Jutsu {
        name: "Transformation Jutsu",
        seals: &[Dog, Boar, Ram],
    },
    Jutsu {
        name: "Earth Style: Mud Wall",
        seals: &[Tiger, Hare, Boar, Dog],
    },
];

pub fn by_name(name: &str) -> Option<&'static Jutsu> {
    CATALOGUE
        .iter()
        .find(|jutsu| jutsu.name.eq_ignore_ascii_case(name))
}

/// Jutsu whose full seal sequence is the tail of `sequence`.
pub fn completed_by(sequence: &[Seal]) -> Vec<&'static Jutsu> {
    CATALOGUE
        .iter()
        .filter(|jutsu| sequence.ends_with(jutsu.seals))
        .collect()
}

/// Jutsu still reachable from `sequence`, i.e. whose seals start with it.
pub fn candidates(sequence: &[Seal]) -> Vec<&'static Jutsu> {
    if sequence.is_empty() {
        return Vec::new();
    }
    CATALOGUE
        .iter()
        .filter(|jutsu| jutsu.seals.len() > sequence.len() && jutsu.seals.starts_with(sequence))
        .collect()
}

pub fn containing(seal: Seal) -> Vec<&'static Jutsu> {
    CATALOGUE
        .iter()
        .filter(|jutsu| jutsu.seals.contains(&seal))
        .collect()
}
