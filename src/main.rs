use anyhow::Result;
use clap::Parser;
use punchcard::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
