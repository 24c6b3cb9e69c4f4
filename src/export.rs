use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashSet;

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::cursor::TimeCursor;
use crate::model::{Commit, ExportOutput, SCHEMA_VERSION};

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let records = crate::loader::load(&common.log).context("Failed to read commit log")?;
    let commits = process_commits(&records, common.repo_url.as_deref());

    let mut cursor = TimeCursor::new(&commits);
    if let Some(cutoff) = common.resolve_cutoff().context("Failed to parse cutoff")? {
        cursor.set_cutoff(cutoff);
    }
    let active = cursor.active(&commits);

    if json {
        output_json(&active, &common)?;
    } else if ndjson {
        output_ndjson(&active)?;
    } else {
        output_summary(&active)?;
    }

    Ok(())
}

fn output_json(active: &[Commit], common: &CommonArgs) -> anyhow::Result<()> {
    let output = ExportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        cutoff: common.cutoff.clone(),
        entries: active.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(active: &[Commit]) -> anyhow::Result<()> {
    for commit in active {
        println!("{}", serde_json::to_string(commit)?);
    }
    Ok(())
}

fn output_summary(active: &[Commit]) -> anyhow::Result<()> {
    println!("{}", style("Export Summary").bold());
    println!("{}", "─".repeat(50));

    let total_lines: usize = active.iter().map(|c| c.total_lines).sum();
    let unique_authors: HashSet<_> = active.iter().map(|c| &c.author).collect();
    let unique_files: HashSet<_> = active
        .iter()
        .flat_map(|c| c.lines())
        .map(|l| &l.file)
        .collect();

    println!("Total commits: {}", style(active.len()).cyan());
    println!("Total lines: {}", style(total_lines).green());
    println!("Files touched: {}", style(unique_files.len()).cyan());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());

    if let (Some(first), Some(last)) = (active.first(), active.last()) {
        println!(
            "Date range: {} to {}",
            style(first.datetime.format("%Y-%m-%d")).dim(),
            style(last.datetime.format("%Y-%m-%d")).dim()
        );
    }

    println!("\nUse --json or --ndjson flags to export the raw data.");
    Ok(())
}
