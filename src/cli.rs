use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "punchcard")]
#[command(about = "Visualize a line-level commit log as stats, breakdowns, and a time-of-day scatter plot")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, default_value = "loc.csv", help = "Path to the line-level commit log (CSV)")]
    pub log: PathBuf,

    #[arg(long, help = "Only consider commits at or before this point (RFC3339, YYYY-MM-DD, or natural language)")]
    pub cutoff: Option<String>,

    #[arg(long, help = "Base repository URL used to derive per-commit links")]
    pub repo_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics over the active commits
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Per-language line breakdown
    Langs {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Per-file listing with one colored mark per line
    Files {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Commit scatter plot (time vs. hour of day)
    Plot {
        #[arg(long = "interactive", alias = "tui", alias = "ui", help = "Enable interactive terminal UI")]
        interactive: bool,
    },
    /// Commit summaries as JSON/NDJSON
    Export {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl CommonArgs {
    pub fn resolve_cutoff(
        &self,
    ) -> crate::error::Result<Option<chrono::DateTime<chrono::FixedOffset>>> {
        self.cutoff
            .as_deref()
            .map(crate::util::parse_cutoff)
            .transpose()
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { json, ndjson } => crate::stats::exec(self.common, json, ndjson),
            Commands::Langs { json, ndjson } => crate::langs::exec(self.common, json, ndjson),
            Commands::Files { json } => crate::files::exec(self.common, json),
            Commands::Plot { interactive } => {
                if interactive {
                    crate::tui::run(&self.common).map_err(|e| anyhow::anyhow!(e))
                } else {
                    crate::plot::exec(self.common)
                }
            }
            Commands::Export { json, ndjson } => crate::export::exec(self.common, json, ndjson),
        }
    }
}
