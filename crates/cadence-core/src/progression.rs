//! Realizing a list of chord roots: stacks, voicings and degree labels

use serde::{Deserialize, Serialize};

use crate::chord::{chord_notes, ChordStack, ChordTexture};
use crate::clip::{ClipTiming, ProgressionClip};
use crate::degree::{degree_of, DegreeLabel};
use crate::mode::Mode;
use crate::note::PitchClass;
use crate::voice_leading::{VoiceLeader, Voicing, VoicingStyle};

/// Key, scale system and chord/voicing options for a progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HarmonicContext {
    pub key: PitchClass,
    pub mode: Mode,
    pub texture: ChordTexture,
    pub style: VoicingStyle,
}

/// One realized chord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionStep {
    pub root: PitchClass,
    pub degree: DegreeLabel,
    pub stack: ChordStack,
    pub voicing: Voicing,
}

/// Realize `roots` in order. Each voicing is led from the previous one.
pub fn realize_progression(context: &HarmonicContext, roots: &[PitchClass]) -> Vec<ProgressionStep> {
    let mut leader = VoiceLeader::new(context.style);
    let steps: Vec<ProgressionStep> = roots
        .iter()
        .map(|&root| {
            let stack = chord_notes(root, context.mode, context.texture);
            let voicing = leader.next(&stack);
            ProgressionStep {
                root,
                degree: degree_of(context.key, context.mode, root),
                stack,
                voicing,
            }
        })
        .collect();

    tracing::debug!(
        key = %context.key,
        mode = %context.mode,
        texture = %context.texture,
        style = %context.style,
        chords = steps.len(),
        "Progression realized"
    );
    steps
}

/// Note events for a realized progression
pub fn progression_clip(steps: &[ProgressionStep], timing: ClipTiming) -> ProgressionClip {
    let voicings: Vec<&[_]> = steps.iter().map(|s| s.voicing.as_slice()).collect();
    ProgressionClip::from_voicings(&voicings, timing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass::*;

    #[test]
    fn test_one_four_five_one_in_c() {
        let context = HarmonicContext::default();
        let steps = realize_progression(&context, &[C, F, G, C]);
        let degrees: Vec<String> = steps.iter().map(|s| s.degree.to_string()).collect();
        assert_eq!(degrees, vec!["I", "IV", "V", "I"]);

        let first: Vec<String> = steps[0].voicing.iter().map(ToString::to_string).collect();
        assert_eq!(first, vec!["C4", "E4", "G4"]);
        // Each voice takes the nearer register: F4, A4 and C5 are five semitones away
        let second: Vec<String> = steps[1].voicing.iter().map(ToString::to_string).collect();
        assert_eq!(second, vec!["F4", "A4", "C5"]);
    }

    #[test]
    fn test_chromatic_root_in_progression() {
        let context = HarmonicContext {
            key: A,
            mode: Mode::Aeolian,
            texture: ChordTexture::Seventh,
            style: VoicingStyle::Wide,
        };
        let steps = realize_progression(&context, &[A, Gs, E]);
        // G# is one semitone from both A and G; degree 0 is checked first
        assert_eq!(steps[1].degree.to_string(), "bI");
        for step in &steps {
            assert_eq!(step.stack.len(), 4);
            assert_eq!(step.voicing.len(), 4);
        }
    }

    #[test]
    fn test_clip_from_steps() {
        let steps = realize_progression(&HarmonicContext::default(), &[C, G]);
        let clip = progression_clip(&steps, ClipTiming::default());
        assert_eq!(clip.notes.len(), 6);
        assert_eq!(clip.notes[0].pitch, 60);
        assert_eq!(clip.notes[3].start_tick, 960);
    }

    #[test]
    fn test_steps_serialize_degree_label() {
        let steps = realize_progression(&HarmonicContext::default(), &[C, Ds]);
        let json = serde_json::to_value(&steps[1]).unwrap();
        assert_eq!(json["root"], "D#");
        assert_eq!(json["degree"], "#II");
    }

    #[test]
    fn test_empty_progression() {
        assert!(realize_progression(&HarmonicContext::default(), &[]).is_empty());
    }
}
