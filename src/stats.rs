use anyhow::Context;
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::cursor::TimeCursor;
use crate::model::{GlobalStats, LineRecord, StatsOutput, SCHEMA_VERSION};
use crate::summary::global_stats;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let records = crate::loader::load(&common.log).context("Failed to read commit log")?;
    let commits = process_commits(&records, common.repo_url.as_deref());

    let mut cursor = TimeCursor::new(&commits);
    if let Some(cutoff) = common.resolve_cutoff().context("Failed to parse cutoff")? {
        cursor.set_cutoff(cutoff);
    }
    let active = cursor.active(&commits);
    let active_records: Vec<LineRecord> = active
        .iter()
        .flat_map(|c| c.lines().iter().cloned())
        .collect();

    let stats = global_stats(&active_records, &active);

    if json {
        output_json(&stats, &common)?;
    } else if ndjson {
        output_ndjson(&stats)?;
    } else {
        output_summary(&stats, &active)?;
    }

    Ok(())
}

fn output_json(stats: &GlobalStats, common: &CommonArgs) -> anyhow::Result<()> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        cutoff: common.cutoff.clone(),
        stats: stats.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(stats: &GlobalStats) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(stats)?);
    Ok(())
}

fn output_summary(stats: &GlobalStats, active: &[crate::model::Commit]) -> anyhow::Result<()> {
    println!("{}", style("Commit Log Statistics").bold());
    println!("{}", "─".repeat(50));

    println!("Total commits: {}", style(stats.total_commits).cyan());
    println!("Number of files: {}", style(stats.file_count).cyan());
    println!("Total LOC: {}", style(stats.total_loc).green());
    println!("Max depth: {}", style(stats.max_depth).yellow());
    println!(
        "Average lines per commit: {}",
        style(stats.avg_lines_per_commit).yellow()
    );
    println!("Longest line: {}", style(stats.longest_line).yellow());

    if let (Some(first), Some(last)) = (active.first(), active.last()) {
        println!(
            "Date range: {} to {}",
            style(first.datetime.format("%Y-%m-%d")).dim(),
            style(last.datetime.format("%Y-%m-%d")).dim()
        );
    }

    Ok(())
}
