//! Urgency and importance scoring.
//!
//! Urgency is cohort-relative: a task's urgency is a position between the
//! earliest and latest due dates of the set being scored, so it can change
//! when other tasks enter or leave the set. Importance is the single
//! ranking key, the product of effective priority and urgency.

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::task::Task;

/// Compute per-task urgency for a scored set.
///
/// Tasks without a due date get the floor. Among dated tasks the earliest
/// due date (most overdue) maps to the ceiling and the latest to the floor,
/// linearly. When the dated cohort collapses to a single date, every dated
/// task gets the ceiling. Tasks with an empty id are skipped.
pub fn urgency_scores(tasks: &[Task], config: &EngineConfig) -> HashMap<String, f64> {
    let mut scores = HashMap::with_capacity(tasks.len());

    let due_dates: Vec<_> = tasks
        .iter()
        .filter(|t| !t.id.is_empty())
        .filter_map(|t| t.due_at)
        .collect();
    let earliest = due_dates.iter().min().copied();
    let latest = due_dates.iter().max().copied();

    for task in tasks.iter().filter(|t| !t.id.is_empty()) {
        let urgency = match (task.due_at, earliest, latest) {
            (None, _, _) => config.urgency_floor,
            (Some(_), Some(min), Some(max)) if min == max => config.urgency_ceiling,
            (Some(due), Some(min), Some(max)) => {
                let span = (max - min).num_seconds() as f64;
                let offset = (due - min).num_seconds() as f64;
                config.urgency_ceiling
                    - offset / span * (config.urgency_ceiling - config.urgency_floor)
            }
            // Unreachable: a dated task implies a non-empty dated cohort.
            (Some(_), _, _) => config.urgency_ceiling,
        };
        scores.insert(task.id.clone(), urgency);
    }

    scores
}

/// Importance of a single task given its precomputed urgency.
///
/// Pure in both arguments; the ranking key everything else sorts by.
pub fn importance(task: &Task, urgency: f64) -> f64 {
    task.effective_priority() * urgency
}
