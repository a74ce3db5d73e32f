//! Core error types for nextup-core.
//!
//! This module defines the error hierarchy for the engine using thiserror.
//! The engine is a pure computation layer, so the failure surface is narrow:
//! invalid snapshot records, invalid configuration, and malformed batch
//! orderings. Degenerate inputs (empty snapshots, single-task tiers) are
//! well-defined results, not errors.

use thiserror::Error;

/// Core error type for nextup-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors for task snapshots and batch orderings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Task has no identity and cannot be scored
    #[error("Task '{title}' has an empty id")]
    MissingId { title: String },

    /// A numeric field is NaN or infinite
    #[error("Task '{task_id}' has a non-finite value for '{field}'")]
    NonFiniteValue { task_id: String, field: String },

    /// Priority adjustment escaped the decay band
    #[error("Task '{task_id}' has priority adjustment {adjustment} outside [0, 1)")]
    AdjustmentOutOfRange { task_id: String, adjustment: f64 },

    /// A batch ordering did not cover the whole batch
    #[error("Ordering lists {got} tasks but the batch has {expected}")]
    OrderLengthMismatch { expected: usize, got: usize },

    /// A batch ordering referenced a task outside the batch
    #[error("Task '{task_id}' is not part of the batch")]
    UnknownBatchTask { task_id: String },

    /// A batch ordering listed the same task twice
    #[error("Task '{task_id}' appears more than once in the ordering")]
    DuplicateBatchTask { task_id: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
