//! Weighted pattern-table progression sampler

use std::fmt;
use std::str::FromStr;

use cadence_core::{build_scale, Mode, PitchClass};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ServiceError};

/// Stylistic flavour selecting a pattern table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vibe {
    #[default]
    Pop,
    Cinematic,
    Jazz,
}

impl Vibe {
    pub const ALL: [Vibe; 3] = [Self::Pop, Self::Cinematic, Self::Jazz];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Cinematic => "cinematic",
            Self::Jazz => "jazz",
        }
    }

    /// Degree patterns (0-based, major-scale reference) for this vibe
    pub fn patterns(&self) -> &'static [WeightedPattern] {
        match self {
            Self::Pop => &POP_PATTERNS,
            Self::Cinematic => &CINEMATIC_PATTERNS,
            Self::Jazz => &JAZZ_PATTERNS,
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vibe {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| ServiceError::UnknownVibe(s.to_string()))
    }
}

// ============================================================================
// Pattern tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedPattern {
    pub degrees: &'static [i32],
    pub weight: u32,
}

impl WeightedPattern {
    pub const fn new(degrees: &'static [i32]) -> Self {
        Self { degrees, weight: 1 }
    }
}

static POP_PATTERNS: [WeightedPattern; 3] = [
    WeightedPattern::new(&[0, 4, 5, 3]), // I V vi IV
    WeightedPattern::new(&[5, 3, 0, 4]), // vi IV I V
    WeightedPattern::new(&[0, 5, 3, 4]), // I vi IV V
];

static CINEMATIC_PATTERNS: [WeightedPattern; 3] = [
    WeightedPattern::new(&[0, 3, 4, 0]), // I IV V I
    WeightedPattern::new(&[0, 2, 5, 4]), // I iii vi V
    WeightedPattern::new(&[0, 5, 2, 3]), // I vi iii IV
];

static JAZZ_PATTERNS: [WeightedPattern; 3] = [
    WeightedPattern::new(&[1, 4, 0, 5]), // ii V I vi
    WeightedPattern::new(&[1, 4, 0, 0]), // ii V I I
    WeightedPattern::new(&[5, 1, 4, 0]), // vi ii V I
];

// ============================================================================
// Sampler
// ============================================================================

/// Picks a pattern by weight and realizes it in a key
#[derive(Debug, Clone)]
pub struct ProgressionSampler {
    rng: fastrand::Rng,
}

impl Default for ProgressionSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionSampler {
    pub fn new() -> Self {
        Self { rng: fastrand::Rng::new() }
    }

    /// Reproducible sampler
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Weighted pick; `None` if the table is empty or all weights are zero.
    pub fn pick<'a>(&mut self, table: &'a [WeightedPattern]) -> Option<&'a WeightedPattern> {
        let total: u32 = table.iter().map(|p| p.weight).sum();
        if total == 0 {
            return None;
        }
        let mut target = self.rng.u32(0..total);
        for pattern in table {
            if target < pattern.weight {
                return Some(pattern);
            }
            target -= pattern.weight;
        }
        None
    }

    /// `length` chord roots following one pattern of `vibe`, repeated as needed.
    pub fn generate(&mut self, key: PitchClass, mode: Mode, vibe: Vibe, length: usize) -> Vec<PitchClass> {
        self.generate_from_table(key, mode, vibe.patterns(), length)
    }

    /// [`generate`](Self::generate) on names, parsed strictly.
    pub fn generate_named(
        &mut self,
        key: &str,
        mode: &str,
        vibe: &str,
        length: usize,
    ) -> Result<Vec<PitchClass>> {
        let key = PitchClass::parse(key)?;
        let mode: Mode = mode.parse()?;
        let vibe: Vibe = vibe.parse()?;
        Ok(self.generate(key, mode, vibe, length))
    }

    pub fn generate_from_table(
        &mut self,
        key: PitchClass,
        mode: Mode,
        table: &[WeightedPattern],
        length: usize,
    ) -> Vec<PitchClass> {
        let Some(pattern) = self.pick(table) else {
            return Vec::new();
        };
        if pattern.degrees.is_empty() {
            return Vec::new();
        }
        debug!(degrees = ?pattern.degrees, %key, %mode, length, "Pattern picked");

        let scale = build_scale(key, mode);
        pattern
            .degrees
            .iter()
            .cycle()
            .take(length)
            .map(|&degree| scale.degree_wrapping(degree).unwrap_or(key))
            .collect()
    }
}
