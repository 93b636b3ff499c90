//! Pitch-class arithmetic and enharmonic normalization

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};

/// Absolute pitch substituted for a voiced note that cannot be decoded.
pub const FALLBACK_ABSOLUTE_PITCH: i32 = 60;

/// Highest register that still renders as a single octave digit.
pub const MAX_OCTAVE: u8 = 9;

const MIDI_NOTE_MAX: i32 = 127;

/// Flat spellings accepted on input, with their sharp equivalents.
pub const ENHARMONIC_FLATS: [(&str, PitchClass); 5] = [
    ("Bb", PitchClass::As),
    ("Eb", PitchClass::Ds),
    ("Ab", PitchClass::Gs),
    ("Db", PitchClass::Cs),
    ("Gb", PitchClass::Fs),
];

// ============================================================================
// Pitch Class
// ============================================================================

/// One of the 12 equal-tempered pitch classes, always spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    #[default]
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Substituted for names that cannot be resolved by [`PitchClass::normalize`].
    pub const FALLBACK: PitchClass = PitchClass::C;

    /// Canonical (sharp) name
    pub fn name(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Cs => "C#",
            Self::D => "D",
            Self::Ds => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::Fs => "F#",
            Self::G => "G",
            Self::Gs => "G#",
            Self::A => "A",
            Self::As => "A#",
            Self::B => "B",
        }
    }

    /// Position on the chromatic circle, C = 0
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for any integer index, wrapping negatives
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Strict parse: one of the 12 sharp names or the 5 accepted flat names.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if let Some(pc) = Self::ALL.iter().copied().find(|pc| pc.name() == name) {
            return Ok(pc);
        }
        ENHARMONIC_FLATS
            .iter()
            .find(|(flat, _)| *flat == name)
            .map(|&(_, pc)| pc)
            .ok_or_else(|| CadenceError::InvalidPitchClass(name.to_string()))
    }

    /// Lenient parse: unrecognized names resolve to [`PitchClass::FALLBACK`].
    pub fn normalize(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|_| {
            tracing::debug!(name, fallback = Self::FALLBACK.name(), "Unrecognized pitch class");
            Self::FALLBACK
        })
    }

    /// Move by `semitones` (any sign) around the chromatic circle.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    /// Signed distance `self - other` in semitones, without circular wrap.
    pub fn semitones_from(self, other: PitchClass) -> i32 {
        self.index() as i32 - other.index() as i32
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PitchClass {
    type Error = CadenceError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

/// Transpose a pitch-class name; unrecognized names yield the fallback untransposed.
pub fn transpose_name(name: &str, semitones: i32) -> PitchClass {
    match PitchClass::parse(name) {
        Ok(pc) => pc.transpose(semitones),
        Err(_) => {
            tracing::debug!(name, "Cannot transpose unrecognized pitch class");
            PitchClass::FALLBACK
        }
    }
}

// ============================================================================
// Voiced Note
// ============================================================================

/// A pitch class fixed in an octave register (e.g. `C4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoicedNote {
    pub pitch_class: PitchClass,
    pub octave: u8,
}

impl VoicedNote {
    pub fn new(pitch_class: PitchClass, octave: u8) -> Self {
        Self {
            pitch_class,
            octave: octave.min(MAX_OCTAVE),
        }
    }

    /// `octave * 12 + index`; only meaningful for comparing registers.
    pub fn absolute_pitch(&self) -> i32 {
        self.octave as i32 * 12 + self.pitch_class.index() as i32
    }

    /// Inverse of [`VoicedNote::absolute_pitch`], clamped to single-digit registers.
    pub fn from_absolute_pitch(pitch: i32) -> Self {
        let octave = pitch.div_euclid(12).clamp(0, MAX_OCTAVE as i32) as u8;
        Self {
            pitch_class: PitchClass::from_index(pitch),
            octave,
        }
    }

    /// MIDI key number (C4 = 60), unbounded
    fn midi_number(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.pitch_class.index() as i32
    }

    /// Standard MIDI note number (C4 = 60). Notes above G9 clamp to 127.
    pub fn midi_note(&self) -> u8 {
        self.midi_number().min(MIDI_NOTE_MAX) as u8
    }

    /// Equal-tempered frequency with A4 = 440 Hz
    pub fn frequency_hz(&self) -> f64 {
        440.0 * 2f64.powf((self.midi_number() as f64 - 69.0) / 12.0)
    }

    /// Absolute pitch of a note name such as `"E4"`, or the fallback pitch if malformed.
    pub fn absolute_pitch_lenient(name: &str) -> i32 {
        match name.parse::<VoicedNote>() {
            Ok(note) => note.absolute_pitch(),
            Err(_) => {
                tracing::debug!(name, fallback = FALLBACK_ABSOLUTE_PITCH, "Malformed voiced note");
                FALLBACK_ABSOLUTE_PITCH
            }
        }
    }
}

impl fmt::Display for VoicedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl FromStr for VoicedNote {
    type Err = CadenceError;

    /// Pitch-class name followed by exactly one octave digit.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CadenceError::InvalidVoicedNote(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let octave = chars
            .next_back()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)?;
        let pitch_class = PitchClass::parse(chars.as_str()).map_err(|_| invalid())?;
        Ok(Self::new(pitch_class, octave as u8))
    }
}

impl TryFrom<String> for VoicedNote {
    type Error = CadenceError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VoicedNote> for String {
    fn from(note: VoicedNote) -> Self {
        note.to_string()
    }
}
