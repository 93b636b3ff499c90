//! Error types for cadence-services

use cadence_core::CadenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unknown vibe: {0}")]
    UnknownVibe(String),
    #[error(transparent)]
    Core(#[from] CadenceError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
