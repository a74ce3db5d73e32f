use clap::{Parser, Subcommand};

mod commands;

use commands::common::SnapshotArgs;

#[derive(Parser)]
#[command(name = "nextup-cli", version, about = "Nextup CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the actionable tasks by importance
    Rank {
        #[command(flatten)]
        args: SnapshotArgs,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Pick the single task to act on next
    Focus {
        #[command(flatten)]
        args: SnapshotArgs,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the contested set that needs a human decision
    Tied {
        #[command(flatten)]
        args: SnapshotArgs,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Calibrate ratings for never-compared tasks
    Calibrate {
        #[command(subcommand)]
        action: commands::calibrate::CalibrateAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Rank { args, json } => commands::rank::run(&args, json),
        Commands::Focus { args, json } => commands::focus::run(&args, json),
        Commands::Tied { args, json } => commands::tied::run(&args, json),
        Commands::Calibrate { action } => commands::calibrate::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
