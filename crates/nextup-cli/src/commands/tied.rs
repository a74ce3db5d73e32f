//! The `tied` command: the contested same-tier set, if any.

use std::error::Error;

use nextup_core::Ranker;

use super::common::{format_scored, SnapshotArgs};

pub fn run(args: &SnapshotArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let tasks = args.load_tasks()?;
    let today = args.today()?;
    let filter = args.filter();
    let ranker = Ranker::with_config(args.engine_config()?);

    let tied = ranker.tied(&tasks, today, &filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tied)?);
        return Ok(());
    }

    if tied.is_empty() {
        println!("No contested tier.");
        return Ok(());
    }
    println!("Contested ({} tasks):", tied.len());
    for (i, scored) in tied.iter().enumerate() {
        println!("{}", format_scored(i + 1, scored));
    }
    Ok(())
}
