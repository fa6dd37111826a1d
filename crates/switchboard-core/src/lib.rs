//! Core types for the switchboard model routing engine.
//!
//! This crate provides the value types shared between the router and its
//! callers: conversations, model metadata, routing constraints, strategies,
//! and the error taxonomy.

/// Caller-supplied routing constraints and filter diagnostics.
pub mod constraints;
/// Conversation messages.
pub mod conversation;
/// Error types and result definitions.
pub mod error;
/// Model identity and metadata.
pub mod model;
/// Routing strategies and extraction modes.
pub mod strategy;

pub use constraints::{ConstraintKind, Elimination, EliminationReport, RoutingConstraints};
pub use conversation::{Message, Role};
pub use error::{Error, Result};
pub use model::{ModelKey, ModelMetadata};
pub use strategy::{ExtractionMode, Strategy};
