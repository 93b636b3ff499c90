//! Circle-of-fifths key catalog

use serde::Serialize;

use crate::mode::{diatonic_roots, Mode};
use crate::note::PitchClass;

/// One key on the circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleSlice {
    /// Spelling used for selection and for the ionian triad table
    pub chord: &'static str,
    pub major: &'static str,
    /// Relative minor
    pub minor: &'static str,
    pub key_signature: &'static str,
}

impl CircleSlice {
    const fn new(chord: &'static str, minor: &'static str, key_signature: &'static str) -> Self {
        Self {
            chord,
            major: chord,
            minor,
            key_signature,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::normalize(self.chord)
    }
}

/// Keys in fifths order starting from C
pub static CIRCLE_OF_FIFTHS: [CircleSlice; 12] = [
    CircleSlice::new("C", "Am", "0"),
    CircleSlice::new("G", "Em", "1♯"),
    CircleSlice::new("D", "Bm", "2♯"),
    CircleSlice::new("A", "F#m", "3♯"),
    CircleSlice::new("E", "C#m", "4♯"),
    CircleSlice::new("B", "G#m", "5♯"),
    CircleSlice::new("F#", "D#m", "6♯"),
    CircleSlice::new("C#", "A#m", "7♯"),
    CircleSlice::new("Ab", "Fm", "4♭"),
    CircleSlice::new("Eb", "Cm", "3♭"),
    CircleSlice::new("Bb", "Gm", "2♭"),
    CircleSlice::new("F", "Dm", "1♭"),
];

/// Circle slices whose root is diatonic to `tonic` in `mode`
pub fn diatonic_slices(tonic: PitchClass, mode: Mode) -> Vec<&'static CircleSlice> {
    let roots = diatonic_roots(tonic, mode);
    CIRCLE_OF_FIFTHS
        .iter()
        .filter(|slice| roots.contains(&slice.pitch_class()))
        .collect()
}
