//! Actionability filtering.
//!
//! Decides which tasks in a snapshot are eligible to be "the next thing to
//! do". A task qualifies only when it is Active, unblocked, past its start
//! date, and matches the optional context and tag facets. Everything here is
//! a pure function of the snapshot and the filter parameters.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskState};

/// Single-select context filter.
///
/// `Unassigned` is the sentinel for "tasks with no context at all".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextFilter {
    /// Match only tasks without a context
    Unassigned,
    /// Match only tasks whose context equals this value exactly
    Named(String),
}

/// Facet filters applied on top of the actionability rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionFilter {
    /// Optional context filter
    #[serde(default)]
    pub context: Option<ContextFilter>,
    /// Tag filter, OR semantics. Empty means no tag filtering; when
    /// non-empty, untagged tasks are excluded.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ActionFilter {
    /// Filter that admits every actionable task.
    pub fn none() -> Self {
        Self::default()
    }

    /// Restrict to a named context.
    pub fn in_context(context: impl Into<String>) -> Self {
        Self {
            context: Some(ContextFilter::Named(context.into())),
            tags: Vec::new(),
        }
    }

    /// Restrict to tasks with no context assigned.
    pub fn without_context() -> Self {
        Self {
            context: Some(ContextFilter::Unassigned),
            tags: Vec::new(),
        }
    }

    /// Restrict to tasks carrying at least one of the given tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    fn matches_facets(&self, task: &Task) -> bool {
        let context_ok = match &self.context {
            None => true,
            Some(ContextFilter::Unassigned) => task.context.is_none(),
            Some(ContextFilter::Named(wanted)) => task.context.as_deref() == Some(wanted.as_str()),
        };
        if !context_ok {
            return false;
        }
        if self.tags.is_empty() {
            return true;
        }
        task.tags.iter().any(|t| self.tags.contains(t))
    }
}

/// Return the actionable subset of a snapshot.
///
/// A task is actionable iff it is Active, every blocker it names is
/// Completed, its start date (if any) is not after `today`, and it passes
/// the facet filters. A blocker id that does not resolve in the snapshot
/// counts as not Completed, so the dependent stays blocked. Tasks with an
/// empty id are dropped up front. Blocking cycles are not detected; every
/// member of a cycle simply stays non-actionable.
pub fn actionable<'a>(
    tasks: &'a [Task],
    today: DateTime<Utc>,
    filter: &ActionFilter,
) -> Vec<&'a Task> {
    let by_id: HashMap<&str, &Task> = tasks
        .iter()
        .filter(|t| !t.id.is_empty())
        .map(|t| (t.id.as_str(), t))
        .collect();

    tasks
        .iter()
        .filter(|t| !t.id.is_empty())
        .filter(|t| matches!(t.state, TaskState::Active))
        .filter(|t| !is_blocked(t, &by_id))
        .filter(|t| t.start_at.map_or(true, |start| start <= today))
        .filter(|t| filter.matches_facets(t))
        .collect()
}

/// Whether any named blocker is still incomplete.
fn is_blocked(task: &Task, by_id: &HashMap<&str, &Task>) -> bool {
    task.blocked_by.iter().any(|blocker_id| {
        match by_id.get(blocker_id.as_str()) {
            Some(blocker) => !matches!(blocker.state, TaskState::Completed),
            None => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(id: &str) -> Task {
        let mut t = Task::new(format!("Task {}", id));
        t.id = id.to_string();
        t
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn active_unblocked_task_is_actionable() {
        let tasks = vec![task("a")];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
        assert_eq!(ids(&hits), vec!["a"]);
    }

    #[test]
    fn non_active_states_are_excluded() {
        let states = [
            TaskState::Deferred,
            TaskState::Delegated,
            TaskState::Someday,
            TaskState::Completed,
            TaskState::Trashed,
        ];
        for state in states {
            let tasks = vec![task("a").with_state(state)];
            let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
            assert!(hits.is_empty(), "state {:?} should not be actionable", state);
        }
    }

    #[test]
    fn completed_blocker_releases_dependent() {
        let tasks = vec![
            task("prereq").with_state(TaskState::Completed),
            task("dependent").blocked_by_task("prereq"),
        ];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
        assert_eq!(ids(&hits), vec!["dependent"]);
    }

    #[test]
    fn incomplete_blocker_in_any_state_keeps_task_blocked() {
        let states = [
            TaskState::Active,
            TaskState::Deferred,
            TaskState::Someday,
            TaskState::Trashed,
        ];
        for state in states {
            let tasks = vec![
                task("prereq").with_state(state),
                task("dependent").blocked_by_task("prereq"),
            ];
            let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
            assert!(
                !ids(&hits).contains(&"dependent".to_string()),
                "blocker in state {:?} should block",
                state
            );
        }
    }

    #[test]
    fn unknown_blocker_keeps_task_blocked() {
        let tasks = vec![task("dependent").blocked_by_task("vanished")];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
        assert!(hits.is_empty());
    }

    #[test]
    fn blocking_cycle_excludes_all_members() {
        let tasks = vec![
            task("a").blocked_by_task("b"),
            task("b").blocked_by_task("a"),
        ];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
        assert!(hits.is_empty());
    }

    #[test]
    fn future_start_date_excludes_even_active_tasks() {
        let now = Utc::now();
        let tasks = vec![
            task("later").with_start_at(now + Duration::days(2)),
            task("ready").with_start_at(now - Duration::days(1)),
        ];
        let hits = actionable(&tasks, now, &ActionFilter::none());
        assert_eq!(ids(&hits), vec!["ready"]);
    }

    #[test]
    fn start_date_equal_to_today_is_actionable() {
        let now = Utc::now();
        let tasks = vec![task("today").with_start_at(now)];
        let hits = actionable(&tasks, now, &ActionFilter::none());
        assert_eq!(ids(&hits), vec!["today"]);
    }

    #[test]
    fn named_context_filter_matches_exactly() {
        let tasks = vec![
            task("office").with_context("office"),
            task("home").with_context("home"),
            task("bare"),
        ];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::in_context("office"));
        assert_eq!(ids(&hits), vec!["office"]);
    }

    #[test]
    fn unassigned_context_filter_matches_contextless_tasks() {
        let tasks = vec![task("office").with_context("office"), task("bare")];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::without_context());
        assert_eq!(ids(&hits), vec!["bare"]);
    }

    #[test]
    fn tag_filter_uses_or_semantics() {
        let tasks = vec![
            task("a").with_tags(vec!["deep".into(), "writing".into()]),
            task("b").with_tags(vec!["email".into()]),
            task("c").with_tags(vec!["deep".into()]),
        ];
        let filter = ActionFilter::none().with_tags(vec!["deep".into(), "review".into()]);
        let hits = actionable(&tasks, Utc::now(), &filter);
        assert_eq!(ids(&hits), vec!["a", "c"]);
    }

    #[test]
    fn untagged_task_is_excluded_when_tag_filter_active() {
        let tasks = vec![task("untagged")];
        let filter = ActionFilter::none().with_tags(vec!["deep".into()]);
        let hits = actionable(&tasks, Utc::now(), &filter);
        assert!(hits.is_empty());
    }

    #[test]
    fn empty_id_task_is_dropped() {
        let mut anonymous = task("x");
        anonymous.id = String::new();
        let tasks = vec![anonymous, task("named")];
        let hits = actionable(&tasks, Utc::now(), &ActionFilter::none());
        assert_eq!(ids(&hits), vec!["named"]);
    }

    #[test]
    fn combined_exclusions() {
        let now = Utc::now();
        let tasks = vec![
            task("done").with_state(TaskState::Completed),
            task("blocked").blocked_by_task("done2"),
            task("future").with_start_at(now + Duration::days(1)),
            task("wrong-context").with_context("home"),
            task("untagged").with_context("office"),
            task("winner")
                .with_context("office")
                .with_tags(vec!["deep".into()]),
        ];
        let filter = ActionFilter::in_context("office").with_tags(vec!["deep".into()]);
        let hits = actionable(&tasks, now, &filter);
        assert_eq!(ids(&hits), vec!["winner"]);
    }
}
