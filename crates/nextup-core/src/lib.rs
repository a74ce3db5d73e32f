//! # Nextup Core Library
//!
//! This library provides the core decision logic for Nextup: given a
//! point-in-time snapshot of tasks, it answers "what should I act on next"
//! and decides when a human has to break a tie instead. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! CLI binary, with richer frontends being thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Filter**: narrows a snapshot to the actionable set (state, blocking,
//!   start dates, context and tag facets)
//! - **Scoring**: cohort-relative urgency plus effective priority, combined
//!   into a single importance key
//! - **Ranker**: total descending order with explicit two-level tie
//!   handling and focus selection
//! - **Calibration**: one-time manual sequencing of never-compared tasks,
//!   converted into ratings by linear interpolation
//!
//! The engine is synchronous and pure: no I/O, no shared state, and no
//! ambient randomness (the calibration RNG is injected by the caller).
//! Persistence, comparison resolution, and UI are external collaborators.
//!
//! ## Key Components
//!
//! - [`Task`]: the snapshot record the engine reads
//! - [`Ranker`]: ranking, tie detection, focus selection
//! - [`Calibrator`]: calibration batches and rating assignment
//! - [`EngineConfig`]: every tunable threshold in one place

pub mod calibration;
pub mod config;
pub mod error;
pub mod filter;
pub mod ranker;
pub mod scoring;
pub mod task;

pub use calibration::{rating_from_rank_position, CalibrationBatch, Calibrator, RatingAssignment};
pub use config::EngineConfig;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use filter::{actionable, ActionFilter, ContextFilter};
pub use ranker::{FocusOutcome, Ranker, ScoredTask};
pub use scoring::{importance, urgency_scores};
pub use task::{PriorityTier, Task, TaskState};
