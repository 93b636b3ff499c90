//! Chord-tone stacks drawn from a scale

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};
use crate::mode::{build_scale, Mode, Scale};
use crate::note::PitchClass;

/// Ordered chord tones; length 3, 4 or 6 for a seven-note scale.
pub type ChordStack = Vec<PitchClass>;

/// How many chord tones to stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordTexture {
    /// 1-3-5
    #[default]
    Triad,
    /// 1-3-5-7
    Seventh,
    /// 1-3-7-9-11-13
    Extended,
}

impl ChordTexture {
    pub const ALL: [ChordTexture; 3] = [Self::Triad, Self::Seventh, Self::Extended];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Triad => "triad",
            Self::Seventh => "seventh",
            Self::Extended => "extended",
        }
    }

    /// Scale degrees picked for this texture. Extended follows chord-tone
    /// stacking order (root, 3rd, 7th, 9th, 11th, 13th), not scale order.
    pub fn degree_pattern(&self) -> &'static [usize] {
        match self {
            Self::Triad => &[0, 2, 4],
            Self::Seventh => &[0, 2, 4, 6],
            Self::Extended => &[0, 2, 6, 1, 3, 5],
        }
    }
}

impl fmt::Display for ChordTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordTexture {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| CadenceError::UnknownTexture(s.to_string()))
    }
}

// ============================================================================
// Ionian triad spellings
// ============================================================================

/// Major triads for the twelve circle-of-fifths keys, keyed by the
/// spelling the circle uses (flats for Ab, Eb, Bb).
const IONIAN_TRIADS: [(&str, [PitchClass; 3]); 12] = {
    use PitchClass::*;
    [
        ("C", [C, E, G]),
        ("G", [G, B, D]),
        ("D", [D, Fs, A]),
        ("A", [A, Cs, E]),
        ("E", [E, Gs, B]),
        ("B", [B, Ds, Fs]),
        ("F", [F, A, C]),
        ("F#", [Fs, As, Cs]),
        ("C#", [Cs, F, Gs]),
        ("Ab", [Gs, C, Ds]),
        ("Eb", [Ds, G, As]),
        ("Bb", [As, D, F]),
    ]
};

fn ionian_triad(root: &str) -> Option<ChordStack> {
    let root = root.trim();
    IONIAN_TRIADS
        .iter()
        .find(|(name, _)| *name == root)
        .map(|(_, triad)| triad.to_vec())
}

// ============================================================================
// Stack extraction
// ============================================================================

/// Pick the texture's degrees out of `scale`.
///
/// Short scales (malformed custom tables) yield a best-effort prefix
/// instead of failing: the whole scale for triads and extended chords,
/// the first four notes for sevenths.
pub fn stack_from_scale(scale: &Scale, texture: ChordTexture) -> ChordStack {
    let required = match texture {
        ChordTexture::Triad => 5,
        ChordTexture::Seventh | ChordTexture::Extended => 7,
    };
    if scale.len() < required {
        tracing::debug!(len = scale.len(), %texture, "Scale too short for texture");
        return match texture {
            ChordTexture::Seventh => scale.iter().take(4).collect(),
            _ => scale.notes().to_vec(),
        };
    }
    texture
        .degree_pattern()
        .iter()
        .filter_map(|&i| scale.degree(i))
        .collect()
}

/// Chord stack for a root in a mode and texture.
pub fn chord_notes(root: PitchClass, mode: Mode, texture: ChordTexture) -> ChordStack {
    get_chord_notes(root.name(), mode, texture)
}

/// Chord stack for a root given by name.
///
/// Ionian triads on circle-of-fifths keys come from the fixed spelling
/// table; every other combination is generated from the scale. Unknown
/// names are normalized to the fallback pitch class first.
pub fn get_chord_notes(root: &str, mode: Mode, texture: ChordTexture) -> ChordStack {
    if mode == Mode::Ionian && texture == ChordTexture::Triad {
        if let Some(triad) = ionian_triad(root) {
            return triad;
        }
    }
    let scale = build_scale(PitchClass::normalize(root), mode);
    stack_from_scale(&scale, texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_stack_lengths_for_all_modes_and_roots() {
        for mode in Mode::ALL {
            for root in PitchClass::ALL {
                assert_eq!(chord_notes(root, mode, ChordTexture::Triad).len(), 3);
                assert_eq!(chord_notes(root, mode, ChordTexture::Seventh).len(), 4);
                assert_eq!(chord_notes(root, mode, ChordTexture::Extended).len(), 6);
            }
        }
    }

    #[test]
    fn test_c_ionian_triad() {
        assert_eq!(get_chord_notes("C", Mode::Ionian, ChordTexture::Triad), vec![C, E, G]);
    }

    #[test]
    fn test_ionian_table_spelling() {
        assert_eq!(get_chord_notes("F#", Mode::Ionian, ChordTexture::Triad), vec![Fs, As, Cs]);
        assert_eq!(get_chord_notes("Bb", Mode::Ionian, ChordTexture::Triad), vec![As, D, F]);
    }

    #[test]
    fn test_ionian_root_missing_from_table_is_generated() {
        // G# and Db are spelled differently on the circle
        assert_eq!(get_chord_notes("G#", Mode::Ionian, ChordTexture::Triad), vec![Gs, C, Ds]);
        assert_eq!(get_chord_notes("Db", Mode::Ionian, ChordTexture::Triad), vec![Cs, F, Gs]);
    }

    #[test]
    fn test_modal_triad_is_generated() {
        assert_eq!(get_chord_notes("D", Mode::Dorian, ChordTexture::Triad), vec![D, F, A]);
        assert_eq!(get_chord_notes("E", Mode::MakamHicaz, ChordTexture::Triad), vec![E, Gs, B]);
    }

    #[test]
    fn test_seventh_and_extended_order() {
        assert_eq!(get_chord_notes("C", Mode::Ionian, ChordTexture::Seventh), vec![C, E, G, B]);
        assert_eq!(
            get_chord_notes("C", Mode::Ionian, ChordTexture::Extended),
            vec![C, E, B, D, F, A]
        );
        assert_eq!(
            get_chord_notes("A", Mode::Aeolian, ChordTexture::Extended),
            vec![A, C, G, B, D, F]
        );
    }

    #[test]
    fn test_short_scale_degrades_to_prefix() {
        let short = Scale::from_intervals(C, &[0, 2, 4]);
        assert_eq!(stack_from_scale(&short, ChordTexture::Triad), vec![C, D, E]);
        assert_eq!(stack_from_scale(&short, ChordTexture::Seventh), vec![C, D, E]);
        assert_eq!(stack_from_scale(&short, ChordTexture::Extended), vec![C, D, E]);

        let six = Scale::from_intervals(C, &[0, 2, 4, 5, 7, 9]);
        assert_eq!(stack_from_scale(&six, ChordTexture::Triad), vec![C, E, G]);
        assert_eq!(stack_from_scale(&six, ChordTexture::Seventh), vec![C, D, E, F]);
        assert_eq!(stack_from_scale(&six, ChordTexture::Extended).len(), 6);
    }

    #[test]
    fn test_unknown_root_name_falls_back() {
        assert_eq!(get_chord_notes("Q", Mode::Lydian, ChordTexture::Triad), vec![C, E, G]);
    }

    #[test]
    fn test_texture_parse() {
        assert_eq!("Seventh".parse::<ChordTexture>(), Ok(ChordTexture::Seventh));
        assert!("ninth".parse::<ChordTexture>().is_err());
    }
}
