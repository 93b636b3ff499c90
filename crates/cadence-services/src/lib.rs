//! cadence-services: pattern-table collaborators around the harmonic engine
//!
//! Progression sampling and makam seyir templates are table lookups; they
//! only hand chord roots to `cadence-core`.

mod error;
pub mod generator;
pub mod seyir;

pub use error::{Result, ServiceError};
pub use generator::{ProgressionSampler, Vibe, WeightedPattern};
pub use seyir::{
    modulations_for_mode, realize_pattern, templates_for_mode, MakamModulation, MakamTemplate,
};
