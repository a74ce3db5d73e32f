//! The `focus` command: the single task to act on next.

use std::error::Error;

use nextup_core::{FocusOutcome, Ranker};

use super::common::{format_scored, SnapshotArgs};

pub fn run(args: &SnapshotArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let tasks = args.load_tasks()?;
    let today = args.today()?;
    let filter = args.filter();
    let ranker = Ranker::with_config(args.engine_config()?);

    let outcome = ranker.focus(&tasks, today, &filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        FocusOutcome::Idle => println!("Nothing to do."),
        FocusOutcome::Focus { pick } => {
            println!("Focus: {}", format_scored(1, &pick));
        }
        FocusOutcome::ComparisonRequired { tied } => {
            println!("Comparison required between {} tasks:", tied.len());
            for (i, scored) in tied.iter().enumerate() {
                println!("{}", format_scored(i + 1, scored));
            }
        }
    }
    Ok(())
}
