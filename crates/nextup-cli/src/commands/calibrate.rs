//! Calibration commands for never-compared tasks.
//!
//! `batch` builds the comparison batch from a seed so the session can be
//! replayed; `apply` rebuilds the same batch with that seed and converts
//! the user's ordering into rating assignments for the store to commit.

use std::error::Error;

use clap::Subcommand;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use nextup_core::Calibrator;

use super::common::SnapshotArgs;

#[derive(Subcommand)]
pub enum CalibrateAction {
    /// Build a comparison batch of never-compared tasks
    Batch {
        #[command(flatten)]
        args: SnapshotArgs,
        /// Seed for sampling and shuffling; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Convert an ordering of the batch into rating assignments
    Apply {
        #[command(flatten)]
        args: SnapshotArgs,
        /// Seed the batch was built with
        #[arg(long)]
        seed: u64,
        /// Task ids, most important first
        #[arg(required = true)]
        order: Vec<String>,
    },
}

pub fn run(action: CalibrateAction) -> Result<(), Box<dyn Error>> {
    match action {
        CalibrateAction::Batch { args, seed, json } => batch(&args, seed, json),
        CalibrateAction::Apply { args, seed, order } => apply(&args, seed, &order),
    }
}

fn batch(args: &SnapshotArgs, seed: Option<u64>, json: bool) -> Result<(), Box<dyn Error>> {
    let tasks = args.load_tasks()?;
    let today = args.today()?;
    let filter = args.filter();
    let calibrator = Calibrator::with_config(args.engine_config()?);

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);
    let batch = calibrator.build_batch(&tasks, today, &filter, &mut rng)?;

    if json {
        let payload = serde_json::json!({ "seed": seed, "batch": batch });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    match batch {
        None => println!("No never-compared actionable tasks."),
        Some(batch) => {
            println!("Calibration batch (seed {seed}, tier {}):", batch.tier);
            println!(
                "Rating band: {:.0} .. {:.0}",
                batch.band_bottom, batch.band_top
            );
            for task in &batch.tasks {
                let marker = if task.is_new() { "new" } else { "anchor" };
                println!("  [{}] {}  ({})", marker, task.title, task.id);
            }
            println!("Order the ids most-important-first and run:");
            println!(
                "  nextup-cli calibrate apply {} --seed {} <id>...",
                args.snapshot.display(),
                seed
            );
        }
    }
    Ok(())
}

fn apply(args: &SnapshotArgs, seed: u64, order: &[String]) -> Result<(), Box<dyn Error>> {
    let tasks = args.load_tasks()?;
    let today = args.today()?;
    let filter = args.filter();
    let calibrator = Calibrator::with_config(args.engine_config()?);

    let mut rng = Mcg128Xsl64::seed_from_u64(seed);
    let batch = calibrator
        .build_batch(&tasks, today, &filter, &mut rng)?
        .ok_or("no calibration batch for this snapshot")?;

    let assignments = calibrator.assign_ratings(&batch, order)?;
    println!("{}", serde_json::to_string_pretty(&assignments)?);
    Ok(())
}
