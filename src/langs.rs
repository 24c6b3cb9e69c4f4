use anyhow::Context;
use chrono::Utc;
use console::style;

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::cursor::TimeCursor;
use crate::model::{LangStat, LangsOutput, SCHEMA_VERSION};
use crate::summary::language_breakdown;
use crate::util::format_percent;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let records = crate::loader::load(&common.log).context("Failed to read commit log")?;
    let commits = process_commits(&records, common.repo_url.as_deref());

    let mut cursor = TimeCursor::new(&commits);
    if let Some(cutoff) = common.resolve_cutoff().context("Failed to parse cutoff")? {
        cursor.set_cutoff(cutoff);
    }
    let active = cursor.active(&commits);
    let breakdown = language_breakdown(&[], &active);

    if json {
        output_json(&breakdown, &common)?;
    } else if ndjson {
        output_ndjson(&breakdown)?;
    } else {
        output_table(&breakdown)?;
    }

    Ok(())
}

fn output_json(breakdown: &[LangStat], common: &CommonArgs) -> anyhow::Result<()> {
    let output = LangsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        cutoff: common.cutoff.clone(),
        entries: breakdown.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(breakdown: &[LangStat]) -> anyhow::Result<()> {
    for entry in breakdown {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_table(breakdown: &[LangStat]) -> anyhow::Result<()> {
    if breakdown.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Language Breakdown").bold());
    println!("{}", "─".repeat(50));

    let max_lines = breakdown.iter().map(|s| s.lines).max().unwrap_or(1).max(1);
    for entry in breakdown {
        let width = (entry.lines as f64 / max_lines as f64 * 24.0).round() as usize;
        println!(
            "{:<12} {:>7} lines  {:>6}  {}",
            entry.language,
            entry.lines,
            format_percent(entry.percent),
            style("█".repeat(width.max(1))).green()
        );
    }

    Ok(())
}
