//! Roman-numeral degree labels for chord roots

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};
use crate::mode::{build_scale, Mode, Scale};
use crate::note::PitchClass;

pub const DEGREE_SYMBOLS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Numeral for a degree index past the seventh; never produced by
/// [`degree_of`] on the built-in modes.
pub const UNKNOWN_DEGREE_SYMBOL: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    Flat,
    Sharp,
}

impl Accidental {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Flat => "b",
            Self::Sharp => "#",
        }
    }
}

/// A scale degree (0-based) with an optional chromatic alteration.
///
/// Serializes as its display label (`"IV"`, `"#II"`, `"bVII"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DegreeLabel {
    pub degree: usize,
    pub accidental: Option<Accidental>,
}

impl DegreeLabel {
    pub fn diatonic(degree: usize) -> Self {
        Self { degree, accidental: None }
    }

    pub fn roman(&self) -> &'static str {
        DEGREE_SYMBOLS.get(self.degree).copied().unwrap_or(UNKNOWN_DEGREE_SYMBOL)
    }

    pub fn is_diatonic(&self) -> bool {
        self.accidental.is_none()
    }
}

impl fmt::Display for DegreeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(acc) = self.accidental {
            f.write_str(acc.symbol())?;
        }
        f.write_str(self.roman())
    }
}

impl FromStr for DegreeLabel {
    type Err = CadenceError;

    /// Optional `b`/`#` followed by one of `I`..`VII`.
    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        let (accidental, numeral) = if let Some(rest) = label.strip_prefix('b') {
            (Some(Accidental::Flat), rest)
        } else if let Some(rest) = label.strip_prefix('#') {
            (Some(Accidental::Sharp), rest)
        } else {
            (None, label)
        };
        let degree = DEGREE_SYMBOLS
            .iter()
            .position(|&symbol| symbol == numeral)
            .ok_or_else(|| CadenceError::InvalidDegreeLabel(s.to_string()))?;
        Ok(Self { degree, accidental })
    }
}

impl TryFrom<String> for DegreeLabel {
    type Error = CadenceError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DegreeLabel> for String {
    fn from(label: DegreeLabel) -> Self {
        label.to_string()
    }
}

/// Place `root` in `scale`. Out-of-scale roots take the nearest degree by
/// plain (non-circular) semitone distance, lowest degree on ties, and get
/// `b`/`#` only when exactly one semitone away. Farther roots keep the bare
/// numeral. `None` only for an empty scale.
pub fn degree_in_scale(scale: &Scale, root: PitchClass) -> Option<DegreeLabel> {
    if let Some(index) = scale.position(root) {
        return Some(DegreeLabel::diatonic(index));
    }

    let (degree, diff) = scale
        .iter()
        .map(|pc| root.semitones_from(pc))
        .enumerate()
        .fold(None, |best: Option<(usize, i32)>, (i, diff)| match best {
            Some((_, best_diff)) if best_diff.abs() <= diff.abs() => best,
            _ => Some((i, diff)),
        })?;

    let accidental = match diff {
        -1 => Some(Accidental::Flat),
        1 => Some(Accidental::Sharp),
        _ => None,
    };
    Some(DegreeLabel { degree, accidental })
}

/// Degree of `chord_root` relative to `tonic` in `mode`.
pub fn degree_of(tonic: PitchClass, mode: Mode, chord_root: PitchClass) -> DegreeLabel {
    let scale = build_scale(tonic, mode);
    // Built-in modes never produce an empty scale
    degree_in_scale(&scale, chord_root).unwrap_or(DegreeLabel::diatonic(0))
}

/// [`degree_of`] on names, normalized leniently; returns the display label.
///
/// Unrecognized names are read as C, so this never returns
/// [`UNKNOWN_DEGREE_SYMBOL`]; that numeral only appears for a
/// [`DegreeLabel`] built by hand with a degree of 7 or more.
pub fn get_degree_for_chord(tonic: &str, mode: Mode, chord_root: &str) -> String {
    degree_of(
        PitchClass::normalize(tonic),
        mode,
        PitchClass::normalize(chord_root),
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_scale_tones_get_plain_numerals() {
        for mode in Mode::ALL {
            for tonic in PitchClass::ALL {
                let scale = build_scale(tonic, mode);
                for (i, pc) in scale.iter().enumerate() {
                    let label = degree_of(tonic, mode, pc);
                    assert_eq!(label, DegreeLabel::diatonic(i));
                    assert_eq!(label.to_string(), DEGREE_SYMBOLS[i]);
                }
            }
        }
    }

    #[test]
    fn test_c_ionian_e_is_iii() {
        assert_eq!(degree_of(C, Mode::Ionian, E).to_string(), "III");
        assert_eq!(get_degree_for_chord("C", Mode::Ionian, "E"), "III");
    }

    #[test]
    fn test_borrowed_roots_get_accidentals() {
        // Eb is 1 below E, Bb is 1 above A (A wins the tie with B by lower degree)
        assert_eq!(degree_of(C, Mode::Ionian, Ds).to_string(), "#II");
        assert_eq!(get_degree_for_chord("C", Mode::Ionian, "Bb"), "#VI");
        assert_eq!(get_degree_for_chord("C", Mode::Ionian, "F#"), "#IV");
        assert_eq!(get_degree_for_chord("C", Mode::Ionian, "Db"), "#I");
    }

    #[test]
    fn test_flat_label_when_nearest_is_above() {
        // D ionian: D E F# G A B C#; C is one below C# only
        assert_eq!(degree_of(D, Mode::Ionian, C).to_string(), "bVII");
        // C hicaz: C C# E F G G# B; D# sits one below E
        assert_eq!(degree_of(C, Mode::MakamHicaz, Ds).to_string(), "bIII");
    }

    #[test]
    fn test_distance_two_has_no_accidental() {
        let scale = Scale::from_intervals(C, &[0, 4, 8]);
        // F# is two from E and from G#; the lower degree wins
        let label = degree_in_scale(&scale, Fs).unwrap();
        assert_eq!(label, DegreeLabel::diatonic(1));
        assert_eq!(label.to_string(), "II");
    }

    #[test]
    fn test_empty_scale_is_unknown() {
        let empty = Scale::from_intervals(C, &[]);
        assert_eq!(degree_in_scale(&empty, D), None);
        let beyond = DegreeLabel::diatonic(9);
        assert_eq!(beyond.roman(), UNKNOWN_DEGREE_SYMBOL);
    }

    #[test]
    fn test_unknown_names_fall_back_to_c() {
        assert_eq!(get_degree_for_chord("G", Mode::Ionian, "zz"), "IV");
        assert_ne!(get_degree_for_chord("zz", Mode::Locrian, "??"), UNKNOWN_DEGREE_SYMBOL);
    }

    #[test]
    fn test_label_serializes_as_display_string() {
        let label = degree_of(C, Mode::Ionian, Ds);
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"#II\"");
        assert_eq!(serde_json::to_string(&degree_of(D, Mode::Ionian, C)).unwrap(), "\"bVII\"");
        assert_eq!(serde_json::from_str::<DegreeLabel>("\"#II\"").unwrap(), label);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!("IV".parse(), Ok(DegreeLabel::diatonic(3)));
        assert_eq!(
            "bVII".parse(),
            Ok(DegreeLabel { degree: 6, accidental: Some(Accidental::Flat) })
        );
        assert!("?".parse::<DegreeLabel>().is_err());
        assert!("#VIII".parse::<DegreeLabel>().is_err());
        assert!("iv".parse::<DegreeLabel>().is_err());
        assert!(serde_json::from_str::<DegreeLabel>("\"x\"").is_err());
    }
}
