//! Initial rating calibration for never-compared tasks.
//!
//! A task that has been through zero head-to-head comparisons carries the
//! neutral default rating, which would strand it mid-tier indefinitely.
//! Calibration surfaces a small batch of such tasks for the user to sequence
//! once, then converts the chosen order into ratings by linear interpolation
//! between the tier's known extremes (or a fixed band when the tier has no
//! rated tasks yet). Persisting the resulting assignments is the caller's
//! responsibility.
//!
//! Sampling and presentation order are the only randomness in the engine.
//! The generator is injected so tests and replayable sessions can seed it.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::filter::{actionable, ActionFilter};
use crate::task::{PriorityTier, Task};

/// Interpolate a rating for a rank position within an ordered batch.
///
/// Position 0 is the most important and maps to `top`; the last position
/// maps to `bottom`. A batch of one gets the exact midpoint.
pub fn rating_from_rank_position(position: usize, batch_len: usize, top: f64, bottom: f64) -> f64 {
    if batch_len <= 1 {
        return (top + bottom) / 2.0;
    }
    top - (position as f64 / (batch_len - 1) as f64) * (top - bottom)
}

/// A batch of tasks awaiting one manual ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBatch {
    /// The tier the batch was drawn from
    pub tier: PriorityTier,
    /// Tasks in randomized presentation order, at most the configured cap
    pub tasks: Vec<Task>,
    /// Upper interpolation bound (highest anchor rating, or the band top)
    pub band_top: f64,
    /// Lower interpolation bound (lowest anchor rating, or the band bottom)
    pub band_bottom: f64,
}

impl CalibrationBatch {
    /// Ids of the batch members, in presentation order.
    pub fn task_ids(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }
}

/// A rating write for the caller's store to commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingAssignment {
    pub task_id: String,
    pub rating: f64,
}

/// Builds calibration batches and converts orderings into ratings.
pub struct Calibrator {
    config: EngineConfig,
}

impl Calibrator {
    /// Create a calibrator with default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create a calibrator with explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a comparison batch from the snapshot, or `None` when no tier
    /// holds a never-compared actionable task.
    ///
    /// Tiers are scanned High to Low and the first with a new actionable
    /// task wins. The batch holds up to `calibration_new_limit` new tasks
    /// (a uniform sample when more exist) plus the highest- and
    /// lowest-rated already-compared tasks of the tier as anchors,
    /// deduplicated when they coincide. Presentation order is shuffled.
    pub fn build_batch<R: Rng + ?Sized>(
        &self,
        tasks: &[Task],
        today: DateTime<Utc>,
        filter: &ActionFilter,
        rng: &mut R,
    ) -> Result<Option<CalibrationBatch>, ValidationError> {
        let pool: Vec<&Task> = actionable(tasks, today, filter);
        for task in &pool {
            task.validate()?;
        }

        for tier in PriorityTier::descending() {
            let fresh: Vec<&Task> = pool
                .iter()
                .copied()
                .filter(|t| t.tier == tier && t.is_new())
                .collect();
            if fresh.is_empty() {
                continue;
            }
            let rated: Vec<&Task> = pool
                .iter()
                .copied()
                .filter(|t| t.tier == tier && !t.is_new())
                .collect();

            let mut batch: Vec<Task> = fresh
                .choose_multiple(rng, self.config.calibration_new_limit)
                .map(|t| (*t).clone())
                .collect();

            let mut band_top = self.config.rating_band_top;
            let mut band_bottom = self.config.rating_band_bottom;
            let highest = rated
                .iter()
                .copied()
                .max_by(|a, b| a.rating.total_cmp(&b.rating));
            let lowest = rated
                .iter()
                .copied()
                .min_by(|a, b| a.rating.total_cmp(&b.rating));
            if let (Some(hi), Some(lo)) = (highest, lowest) {
                band_top = hi.rating;
                band_bottom = lo.rating;
                batch.push(hi.clone());
                if lo.id != hi.id {
                    batch.push(lo.clone());
                }
            }

            batch.shuffle(rng);
            debug_assert!(batch.len() <= self.config.calibration_batch_limit);

            return Ok(Some(CalibrationBatch {
                tier,
                tasks: batch,
                band_top,
                band_bottom,
            }));
        }

        Ok(None)
    }

    /// Convert the user's ordering of a batch into rating assignments.
    ///
    /// `ordered_ids` lists every batch member exactly once, most important
    /// first. Each member, anchors included, gets the interpolated rating
    /// for its position.
    pub fn assign_ratings(
        &self,
        batch: &CalibrationBatch,
        ordered_ids: &[String],
    ) -> Result<Vec<RatingAssignment>, ValidationError> {
        if ordered_ids.len() != batch.tasks.len() {
            return Err(ValidationError::OrderLengthMismatch {
                expected: batch.tasks.len(),
                got: ordered_ids.len(),
            });
        }
        let members: HashSet<&str> = batch.tasks.iter().map(|t| t.id.as_str()).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            if !members.contains(id.as_str()) {
                return Err(ValidationError::UnknownBatchTask {
                    task_id: id.clone(),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicateBatchTask {
                    task_id: id.clone(),
                });
            }
        }

        let len = ordered_ids.len();
        Ok(ordered_ids
            .iter()
            .enumerate()
            .map(|(position, id)| RatingAssignment {
                task_id: id.clone(),
                rating: rating_from_rank_position(position, len, batch.band_top, batch.band_bottom),
            })
            .collect())
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new()
    }
}
