pub mod commands;
pub mod wizard;

use clap::Parser;

pub use commands::{Commands, ViewArgs};

/// Laudo — Technical-inspection report builder
///
/// Keeps inspection reports, their findings, and the chain of
/// re-inspections that follow a first visit, and renders the whole
/// history as a print-ready document.
#[derive(Parser, Debug)]
#[command(
    name = "laudo",
    version,
    about = "📋 Laudo — Technical-inspection report builder",
    long_about = "Laudo manages technical-inspection reports.\nFindings are grouped by location and ordered by risk; completed reports\ncan spawn re-inspections that track the correction of each finding."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
