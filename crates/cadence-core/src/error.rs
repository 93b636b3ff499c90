//! Error types for cadence

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CadenceError {
    #[error("Invalid pitch class: {0}")]
    InvalidPitchClass(String),
    #[error("Invalid voiced note: {0}")]
    InvalidVoicedNote(String),
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
    #[error("Unknown chord texture: {0}")]
    UnknownTexture(String),
    #[error("Unknown voicing style: {0}")]
    UnknownStyle(String),
    #[error("Invalid degree label: {0}")]
    InvalidDegreeLabel(String),
}

pub type Result<T> = std::result::Result<T, CadenceError>;
