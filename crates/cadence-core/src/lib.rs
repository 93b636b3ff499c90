//! cadence-core: harmonic engine for scales, chords, degrees and voice leading
//!
//! Everything here is a pure function of its inputs. Voice leading over a
//! progression is a left-to-right fold (see [`VoiceLeader`]); independent
//! progressions may be evaluated in parallel.

pub mod chord;
pub mod circle;
pub mod clip;
pub mod degree;
mod error;
pub mod harmony;
pub mod makam;
pub mod mode;
pub mod note;
pub mod progression;
pub mod voice_leading;

pub use chord::{chord_notes, get_chord_notes, stack_from_scale, ChordStack, ChordTexture};
pub use circle::{diatonic_slices, CircleSlice, CIRCLE_OF_FIFTHS};
pub use clip::{ClipTiming, MidiNote, ProgressionClip};
pub use degree::{degree_in_scale, degree_of, get_degree_for_chord, Accidental, DegreeLabel};
pub use error::{CadenceError, Result};
pub use harmony::{borrowed_chords, secondary_dominants, BorrowedChord, SecondaryDominant};
pub use makam::{power_notes, MakamMeta};
pub use mode::{build_scale, build_scale_from_name, diatonic_roots, Mode, Scale};
pub use note::{transpose_name, PitchClass, VoicedNote};
pub use progression::{progression_clip, realize_progression, HarmonicContext, ProgressionStep};
pub use voice_leading::{
    get_voice_led_voicing, reduce_to_shell, voice_led_voicing, VoiceLeader, Voicing, VoicingStyle,
};
