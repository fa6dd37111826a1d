use core::result::Result as CoreResult;
use std::io::Error as IoError;

use thiserror::Error;
use toml::de::Error as TomlError;
use toml::ser::Error as TomlSerializeError;

use crate::constraints::{ConstraintKind, EliminationReport};

/// Result type for routing operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while building registries or routing requests.
#[derive(Debug, Error)]
pub enum Error {
    /// Registry or configuration data is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filtering left no candidate models.
    #[error("No candidate models: {0}")]
    NoCandidates(Box<EliminationReport>),

    /// A single constraint cannot be met by any registered model.
    #[error("Constraint conflict on {constraint}: {detail}")]
    ConstraintConflict {
        /// The unsatisfiable constraint.
        constraint: ConstraintKind,
        /// Human-readable explanation.
        detail: String,
    },

    /// Unknown strategy or extraction mode name.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Caller passed an argument outside the accepted range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// TOML serialization failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] TomlSerializeError),
}

impl Error {
    /// Returns `true` when the request could not be served because no model
    /// satisfied its constraints.
    ///
    /// Relaxing the constraints may make a retry succeed.
    pub fn is_no_candidate(&self) -> bool {
        matches!(
            self,
            Self::NoCandidates(_) | Self::ConstraintConflict { .. }
        )
    }

    /// Returns `true` for errors caused by the caller's input rather than by
    /// registry data.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidStrategy(_) | Self::InvalidArgument(_))
    }

    /// Constraints that eliminated the last surviving candidates, if any.
    pub fn binding_constraints(&self) -> Vec<ConstraintKind> {
        match self {
            Self::NoCandidates(report) => report.binding.clone(),
            Self::ConstraintConflict { constraint, .. } => vec![*constraint],
            _ => Vec::new(),
        }
    }
}
