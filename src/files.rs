use anyhow::Context;
use chrono::Utc;
use console::{style, Color};

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::cursor::TimeCursor;
use crate::model::{FilesOutput, SCHEMA_VERSION};
use crate::summary::{file_breakdown, file_entries, FileBreakdown, LanguagePalette};

/// Marks printed per file before the run is truncated with a `(+N)` tail.
const MAX_MARKS: usize = 240;

pub const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let records = crate::loader::load(&common.log).context("Failed to read commit log")?;
    let commits = process_commits(&records, common.repo_url.as_deref());
    let palette = LanguagePalette::assign(&records);

    let mut cursor = TimeCursor::new(&commits);
    if let Some(cutoff) = common.resolve_cutoff().context("Failed to parse cutoff")? {
        cursor.set_cutoff(cutoff);
    }
    let active = cursor.active(&commits);
    let breakdown = file_breakdown(&active);

    if json {
        output_json(&breakdown, &common)?;
    } else {
        output_listing(&breakdown, &palette)?;
    }

    Ok(())
}

fn output_json(breakdown: &[FileBreakdown], common: &CommonArgs) -> anyhow::Result<()> {
    let output = FilesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        log_path: common.log.to_string_lossy().to_string(),
        cutoff: common.cutoff.clone(),
        entries: file_entries(breakdown),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_listing(breakdown: &[FileBreakdown], palette: &LanguagePalette) -> anyhow::Result<()> {
    if breakdown.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Files by lines touched").bold());
    println!("{}", "─".repeat(50));

    for entry in breakdown {
        println!(
            "{} {}",
            style(&entry.file).bold(),
            style(format!("({} lines)", entry.line_count())).dim()
        );

        let mut marks = String::new();
        let shown = entry.languages.len().min(MAX_MARKS);
        for language in entry.languages.iter().take(shown) {
            let color = PALETTE[palette.index_of(language) % PALETTE.len()];
            let styled = console::Style::new().fg(color).apply_to("▪");
            marks.push_str(&styled.to_string());
        }
        if entry.languages.len() > shown {
            marks.push_str(&format!(" … (+{})", entry.languages.len() - shown));
        }
        println!("  {marks}");
    }

    Ok(())
}
