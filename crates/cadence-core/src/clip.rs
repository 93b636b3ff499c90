//! Note-event clips handed to MIDI export

use serde::{Deserialize, Serialize};

use crate::note::VoicedNote;

pub const DEFAULT_PPQ: u16 = 480;
pub const DEFAULT_TEMPO_BPM: u16 = 90;
pub const DEFAULT_BEATS_PER_CHORD: u16 = 2;
pub const DEFAULT_VELOCITY: u8 = 96;

/// A single MIDI note event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidiNote {
    /// MIDI note number (0-127, 60 = middle C)
    pub pitch: u8,
    /// Velocity (0-127)
    pub velocity: u8,
    /// Start position in ticks (PPQ-based)
    pub start_tick: u64,
    /// Duration in ticks
    pub duration_ticks: u64,
}

impl MidiNote {
    pub fn new(pitch: u8, velocity: u8, start_tick: u64, duration_ticks: u64) -> Self {
        Self {
            pitch,
            velocity,
            start_tick,
            duration_ticks,
        }
    }

    /// End tick (start + duration)
    pub fn end_tick(&self) -> u64 {
        self.start_tick + self.duration_ticks
    }
}

/// Timing used when laying voicings out as note events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipTiming {
    /// Pulses per quarter note
    pub ppq: u16,
    pub tempo_bpm: u16,
    /// Chord length in quarter notes
    pub beats_per_chord: u16,
    pub velocity: u8,
}

impl Default for ClipTiming {
    fn default() -> Self {
        Self {
            ppq: DEFAULT_PPQ,
            tempo_bpm: DEFAULT_TEMPO_BPM,
            beats_per_chord: DEFAULT_BEATS_PER_CHORD,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl ClipTiming {
    pub fn ticks_per_chord(&self) -> u64 {
        self.ppq as u64 * self.beats_per_chord as u64
    }
}

/// Block chords, one after another, ready for a MIDI writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionClip {
    pub ppq: u16,
    pub tempo_bpm: u16,
    /// Notes sorted by start_tick
    pub notes: Vec<MidiNote>,
}

impl ProgressionClip {
    /// Lay out voicings back to back; all voices of a chord share start and length.
    pub fn from_voicings<V: AsRef<[VoicedNote]>>(voicings: &[V], timing: ClipTiming) -> Self {
        let step = timing.ticks_per_chord();
        let notes = voicings
            .iter()
            .enumerate()
            .flat_map(|(k, voicing)| {
                let start = k as u64 * step;
                voicing
                    .as_ref()
                    .iter()
                    .map(move |note| MidiNote::new(note.midi_note(), timing.velocity, start, step))
            })
            .collect();
        Self {
            ppq: timing.ppq,
            tempo_bpm: timing.tempo_bpm,
            notes,
        }
    }

    /// Length in ticks
    pub fn length_ticks(&self) -> u64 {
        self.notes.iter().map(MidiNote::end_tick).max().unwrap_or(0)
    }

    /// Length in seconds at the clip tempo
    pub fn length_secs(&self) -> f64 {
        if self.ppq == 0 || self.tempo_bpm == 0 {
            return 0.0;
        }
        let beats = self.length_ticks() as f64 / self.ppq as f64;
        beats * 60.0 / self.tempo_bpm as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::PitchClass;

    #[test]
    fn test_clip_layout() {
        let voicings = vec![
            vec![VoicedNote::new(PitchClass::C, 4), VoicedNote::new(PitchClass::E, 4)],
            vec![VoicedNote::new(PitchClass::G, 3)],
        ];
        let clip = ProgressionClip::from_voicings(&voicings, ClipTiming::default());
        assert_eq!(clip.notes.len(), 3);
        assert_eq!(clip.notes[0], MidiNote::new(60, 96, 0, 960));
        assert_eq!(clip.notes[1], MidiNote::new(64, 96, 0, 960));
        assert_eq!(clip.notes[2], MidiNote::new(55, 96, 960, 960));
        assert_eq!(clip.length_ticks(), 1920);
        // Four beats at 90 BPM
        assert!((clip.length_secs() - 4.0 * 60.0 / 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_clip() {
        let clip = ProgressionClip::from_voicings::<Vec<VoicedNote>>(&[], ClipTiming::default());
        assert!(clip.notes.is_empty());
        assert_eq!(clip.length_ticks(), 0);
    }
}
