//! Register assignment for chord stacks with minimal voice movement
//!
//! Each call places every chord tone in an octave so that the summed
//! positional distance to the previous voicing is smallest. The search is
//! exhaustive over a three-octave window: 3^n candidates for n voices, and
//! n is at most 6.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::ChordStack;
use crate::error::{CadenceError, Result};
use crate::note::{PitchClass, VoicedNote};

/// Registers tried for every voice, in enumeration order
pub const CANDIDATE_OCTAVES: [u8; 3] = [3, 4, 5];

/// Register used for every voice when there is no usable history
pub const DEFAULT_OCTAVE: u8 = 4;

/// Score credit per semitone of spread for [`VoicingStyle::Wide`]
pub const WIDE_SPREAD_REWARD: f64 = 0.3;

/// Wide voicings narrower than this get their top voice lifted an octave
pub const MIN_WIDE_SPREAD: i32 = 7;

/// Concrete notes, positionally aligned with the chord stack
pub type Voicing = Vec<VoicedNote>;

// ============================================================================
// Voicing Style
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicingStyle {
    /// Close voice leading in octaves 3-5
    #[default]
    Smooth,
    /// Rewards spread and forces at least a fifth between outer voices
    Wide,
    /// Reduced to root / third / seventh before voicing
    Shell,
}

impl VoicingStyle {
    pub const ALL: [VoicingStyle; 3] = [Self::Smooth, Self::Wide, Self::Shell];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Wide => "wide",
            Self::Shell => "shell",
        }
    }
}

impl fmt::Display for VoicingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VoicingStyle {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| CadenceError::UnknownStyle(s.to_string()))
    }
}

// ============================================================================
// Shell reduction
// ============================================================================

/// Reduce a stack to three voices: `[s0, s1 or s0, s2 or last]`.
///
/// Positions 1 and 2 are the third and seventh of an extended stack. For a
/// plain seventh stack (1-3-5-7) position 2 is the fifth; the reduction is
/// positional and does not look at chord function.
pub fn reduce_to_shell(stack: &[PitchClass]) -> ChordStack {
    let (Some(&root), Some(&last)) = (stack.first(), stack.last()) else {
        return Vec::new();
    };
    let third = stack.get(1).copied().unwrap_or(root);
    let seventh = stack.get(2).copied().unwrap_or(last);
    vec![root, third, seventh]
}

// ============================================================================
// Candidate enumeration
// ============================================================================

/// Every assignment of [`CANDIDATE_OCTAVES`] to `voices` voices.
///
/// Odometer order: the first voice is the outermost (slowest) digit and the
/// last voice the innermost, matching a nested loop per voice.
struct RegisterCombinations {
    digits: Vec<usize>,
    exhausted: bool,
}

impl RegisterCombinations {
    fn new(voices: usize) -> Self {
        Self {
            digits: vec![0; voices],
            exhausted: false,
        }
    }
}

impl Iterator for RegisterCombinations {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.digits.iter().map(|&d| CANDIDATE_OCTAVES[d]).collect();

        // Advance, innermost voice first
        self.exhausted = true;
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < CANDIDATE_OCTAVES.len() {
                self.exhausted = false;
                break;
            }
            *digit = 0;
        }
        Some(current)
    }
}

fn movement_score(pitches: &[i32], previous: &[i32], style: VoicingStyle) -> f64 {
    let base: i32 = pitches
        .iter()
        .zip(previous)
        .map(|(p, q)| (p - q).abs())
        .sum();
    match style {
        VoicingStyle::Wide => base as f64 - WIDE_SPREAD_REWARD * spread(pitches) as f64,
        VoicingStyle::Smooth | VoicingStyle::Shell => base as f64,
    }
}

fn spread(pitches: &[i32]) -> i32 {
    match (pitches.iter().max(), pitches.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

// ============================================================================
// Optimizer
// ============================================================================

fn initial_voicing(pcs: &[PitchClass], style: VoicingStyle) -> Voicing {
    pcs.iter()
        .enumerate()
        .map(|(i, &pc)| {
            let octave = match style {
                VoicingStyle::Wide => (3 + i).min(5) as u8,
                VoicingStyle::Smooth | VoicingStyle::Shell => DEFAULT_OCTAVE,
            };
            VoicedNote::new(pc, octave)
        })
        .collect()
}

/// Lowest-scoring register assignment; the first candidate reaching the
/// minimum wins.
fn best_registers(pcs: &[PitchClass], previous: &[i32], style: VoicingStyle) -> Vec<i32> {
    let mut best: Vec<i32> = Vec::new();
    let mut best_score = f64::INFINITY;
    let mut evaluated = 0usize;

    for octaves in RegisterCombinations::new(pcs.len()) {
        let pitches: Vec<i32> = pcs
            .iter()
            .zip(&octaves)
            .map(|(&pc, &octave)| VoicedNote::new(pc, octave).absolute_pitch())
            .collect();
        let score = movement_score(&pitches, previous, style);
        evaluated += 1;
        if score < best_score {
            best_score = score;
            best = pitches;
        }
    }

    tracing::trace!(voices = pcs.len(), evaluated, best_score, "Register search complete");
    best
}

/// Lift the single highest voice an octave when the spread is under a fifth.
/// The result is not re-scored.
fn widen(pitches: &mut [i32]) {
    if spread(pitches) >= MIN_WIDE_SPREAD {
        return;
    }
    let Some(&max) = pitches.iter().max() else {
        return;
    };
    if let Some(top) = pitches.iter_mut().find(|p| **p == max) {
        *top += 12;
    }
}

fn lead(previous: Option<&[i32]>, chord: &[PitchClass], style: VoicingStyle) -> Voicing {
    let pcs = match style {
        VoicingStyle::Shell => reduce_to_shell(chord),
        VoicingStyle::Smooth | VoicingStyle::Wide => chord.to_vec(),
    };

    let previous = match previous {
        Some(prev) if prev.len() == pcs.len() && !pcs.is_empty() => prev,
        _ => return initial_voicing(&pcs, style),
    };

    let mut pitches = best_registers(&pcs, previous, style);
    if style == VoicingStyle::Wide {
        widen(&mut pitches);
    }
    pitches.into_iter().map(VoicedNote::from_absolute_pitch).collect()
}

/// Voice `chord` against the previous voicing.
///
/// Without history, or when the voice count changed, a fixed starting
/// voicing is returned (all octave 4; wide stacks from octave 3 upward).
pub fn voice_led_voicing(
    previous: Option<&[VoicedNote]>,
    chord: &[PitchClass],
    style: VoicingStyle,
) -> Voicing {
    let previous: Option<Vec<i32>> =
        previous.map(|notes| notes.iter().map(VoicedNote::absolute_pitch).collect());
    lead(previous.as_deref(), chord, style)
}

/// [`voice_led_voicing`] on note names. Unrecognized pitch classes fall back
/// to C; malformed history notes decode to the fallback absolute pitch.
pub fn get_voice_led_voicing<P, C>(
    previous: Option<&[P]>,
    chord_pitch_classes: &[C],
    style: VoicingStyle,
) -> Vec<String>
where
    P: AsRef<str>,
    C: AsRef<str>,
{
    let previous: Option<Vec<i32>> = previous.map(|names| {
        names
            .iter()
            .map(|n| VoicedNote::absolute_pitch_lenient(n.as_ref()))
            .collect()
    });
    let chord: Vec<PitchClass> = chord_pitch_classes
        .iter()
        .map(|n| PitchClass::normalize(n.as_ref()))
        .collect();
    lead(previous.as_deref(), &chord, style)
        .iter()
        .map(ToString::to_string)
        .collect()
}

// ============================================================================
// Progression fold
// ============================================================================

/// Left-to-right voice leading over a progression: each call is voiced
/// against the previous call's result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceLeader {
    pub style: VoicingStyle,
    previous: Option<Voicing>,
}

impl VoiceLeader {
    pub fn new(style: VoicingStyle) -> Self {
        Self { style, previous: None }
    }

    /// Voice the next chord and remember it as history.
    pub fn next(&mut self, chord: &[PitchClass]) -> Voicing {
        let voicing = voice_led_voicing(self.previous.as_deref(), chord, self.style);
        self.previous = Some(voicing.clone());
        voicing
    }

    pub fn previous(&self) -> Option<&[VoicedNote]> {
        self.previous.as_deref()
    }

    /// Forget history; the next chord gets a starting voicing.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
