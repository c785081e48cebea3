//! Usher Control - CLI client for the Usher daemon.
//!
//! The presentation-layer surface: records interactions on behalf of UI
//! event handlers and inspects the current disclosure state.

mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use usher_common::VERSION;

#[derive(Parser)]
#[command(name = "usherctl")]
#[command(about = "Usher - progressive feature disclosure", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show daemon status and session summary
    Status,

    /// Record an interaction (unknown kinds score the minimum)
    Record {
        /// Interaction kind, e.g. purchase, navigation, learn_complete
        kind: String,

        /// Record it multiple times
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Show score, tier, and progress toward the next unlock
    Progress,

    /// List the feature catalog with unlock state
    Features,

    /// Reset progress to beginner (the only downward transition)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => commands::status().await,
        Commands::Record { kind, count } => commands::record(kind, count).await,
        Commands::Progress => commands::progress().await,
        Commands::Features => commands::features().await,
        Commands::Reset { yes } => commands::reset(yes).await,
    }
}
