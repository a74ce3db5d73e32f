//! Task types for the ranking engine.
//!
//! The engine never creates, deletes, or persists tasks. It consumes a
//! point-in-time snapshot owned by the caller and classifies and orders it.
//! Rating writes produced by calibration are values for the caller's store
//! to commit, not mutations of the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;
use crate::error::ValidationError;

/// Task lifecycle state.
///
/// Exactly one state at a time; external collaborators own the transitions.
/// Only `Active` tasks are candidates for "the next thing to do", and only
/// `Completed` blockers release their dependents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// In play and eligible for ranking
    Active,
    /// Pushed out until a start date arrives
    Deferred,
    /// Handed to someone else, tracked via follow-up
    Delegated,
    /// Parked without a date
    Someday,
    /// Finished (terminal for blocking purposes)
    Completed,
    /// Discarded
    Trashed,
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Active
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Active => "active",
            TaskState::Deferred => "deferred",
            TaskState::Delegated => "delegated",
            TaskState::Someday => "someday",
            TaskState::Completed => "completed",
            TaskState::Trashed => "trashed",
        };
        write!(f, "{}", s)
    }
}

/// Declared priority tier, ordinal 1-3.
///
/// `Ord` follows declaration order, so `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl PriorityTier {
    /// Numeric ordinal: Low = 1, Medium = 2, High = 3.
    pub fn ordinal(&self) -> u8 {
        match self {
            PriorityTier::Low => 1,
            PriorityTier::Medium => 2,
            PriorityTier::High => 3,
        }
    }

    /// Tiers from most to least important, the scan order used everywhere.
    pub fn descending() -> [PriorityTier; 3] {
        [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low]
    }
}

impl Default for PriorityTier {
    fn default() -> Self {
        PriorityTier::Medium
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriorityTier::Low => "low",
            PriorityTier::Medium => "medium",
            PriorityTier::High => "high",
        };
        write!(f, "{}", s)
    }
}

fn default_rating() -> f64 {
    EngineConfig::DEFAULT_RATING
}

/// A work item as seen by the engine.
///
/// Snapshot fields only; history (postponements, comparison outcomes) lives
/// with the store and shows up here pre-aggregated as `priority_adjustment`,
/// `rating`, and `comparison_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique identifier. Tasks with an empty id are excluded from
    /// scoring and filtering.
    pub id: String,
    /// Task title
    pub title: String,
    /// Lifecycle state
    #[serde(default)]
    pub state: TaskState,
    /// Declared priority tier
    #[serde(default)]
    pub tier: PriorityTier,
    /// Accumulated postponement decay in [0, 1). Subtracted from the tier
    /// ordinal to form the effective priority, so a decayed task approaches
    /// but never reaches the tier below it.
    #[serde(default)]
    pub priority_adjustment: f64,
    /// Comparative strength established by head-to-head outcomes or
    /// calibration. Neutral 1500 until the task has been compared.
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Number of head-to-head comparisons this task has been through.
    /// Zero marks a never-ranked task.
    #[serde(default)]
    pub comparison_count: u32,
    /// Optional due date
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Optional start/defer date; the task is not actionable before it
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    /// Optional follow-up date for delegated tasks
    #[serde(default)]
    pub follow_up_at: Option<DateTime<Utc>>,
    /// Ids of tasks that must be Completed before this one is actionable
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Optional single-select context
    #[serde(default)]
    pub context: Option<String>,
    /// Tags for multi-select filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new active task with default values.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            title: title.into(),
            state: TaskState::Active,
            tier: PriorityTier::Medium,
            priority_adjustment: 0.0,
            rating: EngineConfig::DEFAULT_RATING,
            comparison_count: 0,
            due_at: None,
            start_at: None,
            follow_up_at: None,
            blocked_by: Vec::new(),
            context: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the declared tier.
    pub fn with_tier(mut self, tier: PriorityTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the lifecycle state.
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Set the due date.
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Set the start date.
    pub fn with_start_at(mut self, start_at: DateTime<Utc>) -> Self {
        self.start_at = Some(start_at);
        self
    }

    /// Set the context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Add a blocking prerequisite by id.
    pub fn blocked_by_task(mut self, id: impl Into<String>) -> Self {
        self.blocked_by.push(id.into());
        self
    }

    /// Set the rating and bump the comparison count past zero.
    pub fn with_rating(mut self, rating: f64, comparison_count: u32) -> Self {
        self.rating = rating;
        self.comparison_count = comparison_count;
        self
    }

    /// Whether this task has never been through a head-to-head comparison.
    pub fn is_new(&self) -> bool {
        self.comparison_count == 0
    }

    /// Declared tier reduced by accumulated adjustment.
    ///
    /// Stays strictly above `ordinal - 1` for valid tasks, so undamped
    /// tiers never collide.
    pub fn effective_priority(&self) -> f64 {
        self.tier.ordinal() as f64 - self.priority_adjustment
    }

    /// Check the invariants the engine relies on.
    ///
    /// An empty id is reported here but treated as "excluded from scoring"
    /// by the filter rather than as a hard failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId {
                title: self.title.clone(),
            });
        }
        if !self.rating.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                task_id: self.id.clone(),
                field: "rating".to_string(),
            });
        }
        if !self.priority_adjustment.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                task_id: self.id.clone(),
                field: "priority_adjustment".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.priority_adjustment) {
            return Err(ValidationError::AdjustmentOutOfRange {
                task_id: self.id.clone(),
                adjustment: self.priority_adjustment,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_state_default() {
        assert_eq!(TaskState::default(), TaskState::Active);
    }

    #[test]
    fn tier_ordinals() {
        assert_eq!(PriorityTier::Low.ordinal(), 1);
        assert_eq!(PriorityTier::Medium.ordinal(), 2);
        assert_eq!(PriorityTier::High.ordinal(), 3);
    }

    #[test]
    fn tier_ordering() {
        assert!(PriorityTier::Low < PriorityTier::Medium);
        assert!(PriorityTier::Medium < PriorityTier::High);
        assert_eq!(
            PriorityTier::descending(),
            [PriorityTier::High, PriorityTier::Medium, PriorityTier::Low]
        );
    }

    #[test]
    fn task_creation() {
        let task = Task::new("Write report");
        assert_eq!(task.title, "Write report");
        assert_eq!(task.state, TaskState::Active);
        assert_eq!(task.tier, PriorityTier::Medium);
        assert_eq!(task.rating, 1500.0);
        assert!(task.is_new());
        assert!(task.blocked_by.is_empty());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn effective_priority_subtracts_adjustment() {
        let mut task = Task::new("t").with_tier(PriorityTier::High);
        assert_eq!(task.effective_priority(), 3.0);
        task.priority_adjustment = 0.75;
        assert_eq!(task.effective_priority(), 2.25);
    }

    #[test]
    fn effective_priority_stays_above_next_tier() {
        let mut task = Task::new("t").with_tier(PriorityTier::High);
        task.priority_adjustment = 0.999_999;
        assert!(task.validate().is_ok());
        assert!(task.effective_priority() > 2.0);
    }

    #[test]
    fn validate_rejects_empty_id() {
        let mut task = Task::new("anonymous");
        task.id = String::new();
        assert!(matches!(
            task.validate(),
            Err(ValidationError::MissingId { .. })
        ));
    }

    #[test]
    fn validate_rejects_nan_rating() {
        let mut task = Task::new("t");
        task.rating = f64::NAN;
        assert!(matches!(
            task.validate(),
            Err(ValidationError::NonFiniteValue { ref field, .. }) if field == "rating"
        ));
    }

    #[test]
    fn validate_rejects_adjustment_at_band_boundary() {
        let mut task = Task::new("t").with_tier(PriorityTier::Medium);
        task.priority_adjustment = 1.0;
        assert!(matches!(
            task.validate(),
            Err(ValidationError::AdjustmentOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_adjustment() {
        let mut task = Task::new("t");
        task.priority_adjustment = -0.1;
        assert!(task.validate().is_err());
    }

    #[test]
    fn task_serialization_roundtrip() {
        let task = Task::new("Serialize me")
            .with_tier(PriorityTier::High)
            .with_context("office")
            .with_tags(vec!["deep".to_string(), "writing".to_string()])
            .with_rating(1620.0, 4)
            .blocked_by_task("task-upstream");

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, task);
    }

    #[test]
    fn sparse_snapshot_record_fills_defaults() {
        let json = r#"{"id": "t-1", "title": "Minimal"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.state, TaskState::Active);
        assert_eq!(task.tier, PriorityTier::Medium);
        assert_eq!(task.rating, 1500.0);
        assert_eq!(task.comparison_count, 0);
        assert!(task.due_at.is_none());
        assert!(task.tags.is_empty());
    }
}
