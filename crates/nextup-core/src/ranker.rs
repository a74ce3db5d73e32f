//! Importance ranking, tie detection, and focus selection.
//!
//! The ranker turns an actionable snapshot into a total, explainable order
//! and decides whether a single task can be picked automatically or a human
//! has to break a tie. Ties are resolved on two levels: scores within the
//! tie epsilon form the top band, and only band members sharing the same
//! declared tier count as a genuine tie. A band that spans tiers is an
//! artifact of postponement decay and is broken deterministically in favor
//! of the higher tier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::filter::{actionable, ActionFilter};
use crate::scoring::{importance, urgency_scores};
use crate::task::Task;

/// A task together with the scores that placed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// The underlying task (a value, not a reference into the snapshot)
    pub task: Task,
    /// Cohort-relative urgency
    pub urgency: f64,
    /// Declared tier minus accumulated adjustment
    pub effective_priority: f64,
    /// The ranking key: effective priority times urgency
    pub importance: f64,
}

/// Outcome of focus selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FocusOutcome {
    /// Nothing is actionable
    Idle,
    /// Exactly one task won
    Focus { pick: ScoredTask },
    /// Two or more tasks of the same declared tier are tied at the top;
    /// a human has to compare them
    ComparisonRequired { tied: Vec<ScoredTask> },
}

/// Ranks actionable tasks and selects the focus.
pub struct Ranker {
    config: EngineConfig,
}

impl Ranker {
    /// Create a ranker with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create a ranker with explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rank the actionable subset of a snapshot, most important first.
    ///
    /// Every actionable task is validated before any scoring happens, so a
    /// malformed record surfaces as a typed error instead of corrupting the
    /// order. The sort is stable; tasks the scores cannot separate keep
    /// their snapshot order, and tie handling is explicit downstream.
    pub fn rank(
        &self,
        tasks: &[Task],
        today: DateTime<Utc>,
        filter: &ActionFilter,
    ) -> Result<Vec<ScoredTask>, ValidationError> {
        let pool: Vec<Task> = actionable(tasks, today, filter)
            .into_iter()
            .cloned()
            .collect();
        for task in &pool {
            task.validate()?;
        }

        let urgencies = urgency_scores(&pool, &self.config);
        let mut ranked: Vec<ScoredTask> = pool
            .into_iter()
            .map(|task| {
                let urgency = urgencies
                    .get(&task.id)
                    .copied()
                    .unwrap_or(self.config.urgency_floor);
                let effective_priority = task.effective_priority();
                let importance = importance(&task, urgency);
                ScoredTask {
                    task,
                    urgency,
                    effective_priority,
                    importance,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        Ok(ranked)
    }

    /// The top band of a ranking: every task tied with the highest score.
    ///
    /// Scans from the top and stops at the first task whose gap from the
    /// leader exceeds the tie epsilon.
    pub fn top_band<'a>(&self, ranked: &'a [ScoredTask]) -> &'a [ScoredTask] {
        let Some(first) = ranked.first() else {
            return &[];
        };
        let mut end = 1;
        while end < ranked.len()
            && first.importance - ranked[end].importance <= self.config.tie_epsilon
        {
            end += 1;
        }
        &ranked[..end]
    }

    /// Select the focus from a precomputed ranking.
    ///
    /// A band spanning several tiers resolves to the highest tier without
    /// bothering the user; only a contested highest tier goes to a human.
    pub fn focus_from_ranked(&self, ranked: &[ScoredTask]) -> FocusOutcome {
        let band = self.top_band(ranked);
        let Some(first) = band.first() else {
            return FocusOutcome::Idle;
        };
        if band.len() == 1 {
            return FocusOutcome::Focus {
                pick: first.clone(),
            };
        }

        let top_tier = band
            .iter()
            .map(|s| s.task.tier)
            .max()
            .unwrap_or(first.task.tier);
        let leaders: Vec<ScoredTask> = band
            .iter()
            .filter(|s| s.task.tier == top_tier)
            .cloned()
            .collect();
        match leaders.len() {
            1 => FocusOutcome::Focus {
                pick: leaders.into_iter().next().unwrap_or_else(|| first.clone()),
            },
            _ => FocusOutcome::ComparisonRequired { tied: leaders },
        }
    }

    /// Filter, rank, and select the focus in one step.
    pub fn focus(
        &self,
        tasks: &[Task],
        today: DateTime<Utc>,
        filter: &ActionFilter,
    ) -> Result<FocusOutcome, ValidationError> {
        let ranked = self.rank(tasks, today, filter)?;
        Ok(self.focus_from_ranked(&ranked))
    }

    /// The contested set of a precomputed ranking.
    ///
    /// Walks tiers from High to Low and returns the members of the first
    /// tier with two or more tasks in the top band. Tiers with a single
    /// band member are not contested.
    pub fn tied_from_ranked(&self, ranked: &[ScoredTask]) -> Vec<ScoredTask> {
        let band = self.top_band(ranked);
        for tier in crate::task::PriorityTier::descending() {
            let members: Vec<ScoredTask> = band
                .iter()
                .filter(|s| s.task.tier == tier)
                .cloned()
                .collect();
            if members.len() >= 2 {
                return members;
            }
        }
        Vec::new()
    }

    /// Filter, rank, and report the contested set in one step.
    pub fn tied(
        &self,
        tasks: &[Task],
        today: DateTime<Utc>,
        filter: &ActionFilter,
    ) -> Result<Vec<ScoredTask>, ValidationError> {
        let ranked = self.rank(tasks, today, filter)?;
        Ok(self.tied_from_ranked(&ranked))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}
