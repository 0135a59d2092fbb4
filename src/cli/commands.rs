use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new root inspection report (interactive)
    New,

    /// List all reports in the store
    List,

    /// Render a report's full revision chain
    View(ViewArgs),

    /// Create a re-inspection of the latest report in a chain
    Reinspect {
        /// Id of any report in the chain
        report_id: String,
    },

    /// Add a finding to a report (interactive)
    AddItem {
        /// Id of the report to extend
        report_id: String,
    },

    /// Record the correction outcome of a finding (interactive)
    EditItem {
        /// Id of the report
        report_id: String,

        /// Id of the finding to update
        finding_id: String,
    },

    /// Remove a finding from a report
    RemoveItem {
        /// Id of the report
        report_id: String,

        /// Id of the finding to remove
        finding_id: String,
    },

    /// Initialize a .laudo.toml config file in the current directory
    Init,
}

#[derive(clap::Args, Debug)]
pub struct ViewArgs {
    /// Id of the report whose chain to render
    pub report_id: String,

    /// Output format: "terminal" or "json"
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write JSON document to file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
