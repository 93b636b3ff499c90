//! Chromatic chord suggestions relative to a key: modal interchange and
//! secondary dominants. Both always reference the major (ionian) key and its
//! parallel minor, whatever mode is active.

use serde::{Deserialize, Serialize};

use crate::mode::{build_scale, Mode};
use crate::note::PitchClass;

/// A chord root borrowed from the parallel minor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowedChord {
    /// Function label, e.g. "♭III"
    pub label: &'static str,
    pub root: PitchClass,
}

/// Dominant of a diatonic degree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryDominant {
    /// e.g. "V/ii"
    pub label: String,
    /// Degree being tonicized
    pub target: PitchClass,
    pub root: PitchClass,
}

/// Aeolian degrees lent to the major key, with their labels
const BORROWED_DEGREES: [(usize, &str); 4] = [(2, "♭III"), (3, "iv"), (5, "♭VI"), (6, "♭VII")];

/// Ionian degrees that receive a secondary dominant
const TONICIZED_DEGREES: [(usize, &str); 5] = [(1, "ii"), (2, "iii"), (3, "IV"), (4, "V"), (5, "vi")];

/// A perfect fifth, the distance from a dominant down to its target
const DOMINANT_OFFSET: i32 = 7;

pub fn borrowed_chords(key_root: PitchClass) -> Vec<BorrowedChord> {
    let minor = build_scale(key_root, Mode::Aeolian);
    BORROWED_DEGREES
        .iter()
        .filter_map(|&(degree, label)| {
            minor.degree(degree).map(|root| BorrowedChord { label, root })
        })
        .collect()
}

pub fn secondary_dominants(key_root: PitchClass) -> Vec<SecondaryDominant> {
    let major = build_scale(key_root, Mode::Ionian);
    TONICIZED_DEGREES
        .iter()
        .filter_map(|&(degree, label)| {
            major.degree(degree).map(|target| SecondaryDominant {
                label: format!("V/{label}"),
                target,
                root: target.transpose(DOMINANT_OFFSET),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_borrowed_in_c() {
        let borrowed = borrowed_chords(C);
        let pairs: Vec<(&str, PitchClass)> = borrowed.iter().map(|b| (b.label, b.root)).collect();
        assert_eq!(pairs, vec![("♭III", Ds), ("iv", F), ("♭VI", Gs), ("♭VII", As)]);
    }

    #[test]
    fn test_secondary_dominants_in_c() {
        let doms = secondary_dominants(C);
        let labels: Vec<&str> = doms.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["V/ii", "V/iii", "V/IV", "V/V", "V/vi"]);
        let roots: Vec<PitchClass> = doms.iter().map(|d| d.root).collect();
        assert_eq!(roots, vec![A, B, C, D, E]);
    }

    #[test]
    fn test_secondary_dominants_wrap_around() {
        let doms = secondary_dominants(A);
        // ii of A is B; its dominant is F#
        assert_eq!(doms[0].target, B);
        assert_eq!(doms[0].root, Fs);
        assert_eq!(doms[4].root, Cs);
    }
}
