//! Shared snapshot loading and filter handling for CLI commands.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;

use nextup_core::{ActionFilter, ContextFilter, EngineConfig, ScoredTask, Task};

/// Arguments shared by every command that consumes a snapshot.
#[derive(Args, Clone)]
pub struct SnapshotArgs {
    /// Path to the task snapshot (JSON array of tasks)
    pub snapshot: PathBuf,
    /// Reference date (RFC3339); defaults to now
    #[arg(long)]
    pub today: Option<String>,
    /// Only consider tasks in this context
    #[arg(long, conflicts_with = "no_context")]
    pub context: Option<String>,
    /// Only consider tasks with no context assigned
    #[arg(long)]
    pub no_context: bool,
    /// Only consider tasks carrying at least one of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Engine configuration overrides (TOML file)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SnapshotArgs {
    /// Load the snapshot file.
    pub fn load_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let raw = fs::read_to_string(&self.snapshot)?;
        let tasks: Vec<Task> = serde_json::from_str(&raw)?;
        Ok(tasks)
    }

    /// Resolve the reference date.
    pub fn today(&self) -> Result<DateTime<Utc>, Box<dyn Error>> {
        match &self.today {
            Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc)),
            None => Ok(Utc::now()),
        }
    }

    /// Build the facet filter from the flags.
    pub fn filter(&self) -> ActionFilter {
        let context = if self.no_context {
            Some(ContextFilter::Unassigned)
        } else {
            self.context.clone().map(ContextFilter::Named)
        };
        ActionFilter {
            context,
            tags: self.tags.clone(),
        }
    }

    /// Load engine configuration, applying the optional TOML override file.
    pub fn engine_config(&self) -> Result<EngineConfig, Box<dyn Error>> {
        match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                Ok(EngineConfig::from_toml_str(&raw)?)
            }
            None => Ok(EngineConfig::default()),
        }
    }
}

/// One line of human-readable output for a scored task.
pub fn format_scored(position: usize, scored: &ScoredTask) -> String {
    format!(
        "{:>2}. [{}] {}  importance={:.2} urgency={:.2} priority={:.2}  ({})",
        position,
        scored.task.tier,
        scored.task.title,
        scored.importance,
        scored.urgency,
        scored.effective_priority,
        scored.task.id,
    )
}
