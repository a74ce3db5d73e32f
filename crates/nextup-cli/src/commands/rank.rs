//! The `rank` command: ranked importance list.

use std::error::Error;

use nextup_core::Ranker;

use super::common::{format_scored, SnapshotArgs};

pub fn run(args: &SnapshotArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let tasks = args.load_tasks()?;
    let today = args.today()?;
    let filter = args.filter();
    let ranker = Ranker::with_config(args.engine_config()?);

    let ranked = ranker.rank(&tasks, today, &filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.is_empty() {
        println!("No actionable tasks.");
        return Ok(());
    }
    for (i, scored) in ranked.iter().enumerate() {
        println!("{}", format_scored(i + 1, scored));
    }
    Ok(())
}
