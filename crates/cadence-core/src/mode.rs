//! Mode and makam interval tables, scale construction

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};
use crate::note::PitchClass;

// ============================================================================
// Mode
// ============================================================================

/// Scale systems: the seven Western modes plus four makams
/// approximated on the 12-tone equal-tempered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    MakamHicaz,
    MakamKurdi,
    MakamHuseyni,
    MakamUssak,
}

impl Mode {
    pub const ALL: [Mode; 11] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
        Mode::MakamHicaz,
        Mode::MakamKurdi,
        Mode::MakamHuseyni,
        Mode::MakamUssak,
    ];

    /// External identifier (`"ionian"`, `"makam_hicaz"`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ionian => "ionian",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Aeolian => "aeolian",
            Self::Locrian => "locrian",
            Self::MakamHicaz => "makam_hicaz",
            Self::MakamKurdi => "makam_kurdi",
            Self::MakamHuseyni => "makam_huseyni",
            Self::MakamUssak => "makam_ussak",
        }
    }

    /// Semitone offsets from the root, one per scale degree.
    ///
    /// Makam rows are 12-TET stand-ins for intervals that traditionally
    /// fall between the semitones (koma); the rounding is intentional.
    pub fn intervals(&self) -> &'static [u8; 7] {
        match self {
            Self::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            // Steps 1-3-1-2-1-3-1
            Self::MakamHicaz => &[0, 1, 4, 5, 7, 8, 11],
            // Same grid as phrygian
            Self::MakamKurdi => &[0, 1, 3, 5, 7, 8, 10],
            // Same grid as dorian
            Self::MakamHuseyni => &[0, 2, 3, 5, 7, 9, 10],
            Self::MakamUssak => &[0, 1, 3, 5, 7, 9, 10],
        }
    }

    pub fn is_makam(&self) -> bool {
        matches!(
            self,
            Self::MakamHicaz | Self::MakamKurdi | Self::MakamHuseyni | Self::MakamUssak
        )
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| CadenceError::UnknownMode(s.to_string()))
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Pitch classes of a scale in degree order; degree 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale {
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Scale from an arbitrary offset table. Built-in modes always
    /// yield seven notes; custom tables may be shorter.
    pub fn from_intervals(root: PitchClass, intervals: &[u8]) -> Self {
        Self {
            notes: intervals
                .iter()
                .map(|&semi| root.transpose(semi as i32))
                .collect(),
        }
    }

    pub fn root(&self) -> Option<PitchClass> {
        self.notes.first().copied()
    }

    /// Pitch class at a 0-based degree
    pub fn degree(&self, index: usize) -> Option<PitchClass> {
        self.notes.get(index).copied()
    }

    /// Pitch class at any integer degree, wrapping around the scale
    pub fn degree_wrapping(&self, degree: i32) -> Option<PitchClass> {
        if self.notes.is_empty() {
            return None;
        }
        let len = self.notes.len() as i32;
        self.degree(degree.rem_euclid(len) as usize)
    }

    pub fn position(&self, pc: PitchClass) -> Option<usize> {
        self.notes.iter().position(|&n| n == pc)
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.notes.iter().copied()
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.notes.iter().map(|pc| pc.name()).collect();
        f.write_str(&names.join(" "))
    }
}

/// Seven-note scale for `root` in `mode`, in offset order.
pub fn build_scale(root: PitchClass, mode: Mode) -> Scale {
    Scale::from_intervals(root, mode.intervals())
}

/// [`build_scale`] for a root given by name, normalized leniently.
pub fn build_scale_from_name(root: &str, mode: Mode) -> Scale {
    build_scale(PitchClass::normalize(root), mode)
}

/// In-key chord roots for highlighting, ordered by degree.
pub fn diatonic_roots(root: PitchClass, mode: Mode) -> Vec<PitchClass> {
    build_scale(root, mode).notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_every_mode_has_strictly_increasing_offsets_from_zero() {
        for mode in Mode::ALL {
            let iv = mode.intervals();
            assert_eq!(iv[0], 0, "{mode}");
            assert!(iv.windows(2).all(|w| w[0] < w[1]), "{mode}");
            assert!(iv[6] < 12, "{mode}");
        }
    }

    #[test]
    fn test_scale_length_and_root_for_all_modes_and_roots() {
        for mode in Mode::ALL {
            for root in PitchClass::ALL {
                let scale = build_scale(root, mode);
                assert_eq!(scale.len(), 7);
                assert_eq!(scale.root(), Some(root));
            }
        }
    }

    #[test]
    fn test_c_ionian() {
        let scale = build_scale(C, Mode::Ionian);
        assert_eq!(scale.notes(), &[C, D, E, F, G, A, B]);
    }

    #[test]
    fn test_c_hicaz() {
        let scale = build_scale(C, Mode::MakamHicaz);
        assert_eq!(scale.notes(), &[C, Cs, E, F, G, Gs, B]);
    }

    #[test]
    fn test_flat_root_by_name() {
        let scale = build_scale_from_name("Eb", Mode::Aeolian);
        assert_eq!(scale.notes(), &[Ds, F, Fs, Gs, As, B, Cs]);
        // Unrecognized names fall back to C
        assert_eq!(build_scale_from_name("??", Mode::Dorian).root(), Some(C));
    }

    #[test]
    fn test_diatonic_roots_in_degree_order() {
        assert_eq!(diatonic_roots(G, Mode::Mixolydian), vec![G, A, B, C, D, E, F]);
    }

    #[test]
    fn test_degree_wrapping() {
        let scale = build_scale(D, Mode::Dorian);
        assert_eq!(scale.degree_wrapping(7), Some(D));
        assert_eq!(scale.degree_wrapping(-1), Some(C));
        assert_eq!(Scale::from_intervals(C, &[]).degree_wrapping(3), None);
    }

    #[test]
    fn test_mode_names_parse() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
        assert_eq!("Makam_Ussak".parse::<Mode>(), Ok(Mode::MakamUssak));
        assert!("bebop".parse::<Mode>().is_err());
        assert_eq!(serde_json::to_string(&Mode::MakamHuseyni).unwrap(), "\"makam_huseyni\"");
    }

    #[test]
    fn test_makam_flag() {
        let makams: Vec<Mode> = Mode::ALL.into_iter().filter(|m| m.is_makam()).collect();
        assert_eq!(makams.len(), 4);
        assert!(!Mode::Locrian.is_makam());
    }

    #[test]
    fn test_scale_serializes_as_plain_list() {
        let scale = build_scale(PitchClass::D, Mode::Dorian);
        let json = serde_json::to_string(&scale).unwrap();
        assert_eq!(json, r#"["D","E","F","G","A","B","C"]"#);
        assert_eq!(serde_json::from_str::<Scale>(&json).unwrap(), scale);
    }
}
