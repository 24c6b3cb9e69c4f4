use std::collections::{HashMap, HashSet};

use crate::model::{Commit, FileEntry, GlobalStats, LangStat, LineRecord};
use crate::scale::finite_extent;

/// Aggregate statistics over the active records and commits. Pure function;
/// non-finite numeric fields (lenient-coerced rows) are skipped.
pub fn global_stats(records: &[LineRecord], commits: &[Commit]) -> GlobalStats {
    let file_count = records
        .iter()
        .map(|r| r.file.as_str())
        .collect::<HashSet<_>>()
        .len();

    let max_depth = finite_extent(records.iter().map(|r| r.depth))
        .map(|(_, max)| max as u64)
        .unwrap_or(0);
    let longest_line = finite_extent(records.iter().map(|r| r.length))
        .map(|(_, max)| max as u64)
        .unwrap_or(0);

    let avg_lines_per_commit = if commits.is_empty() {
        0.0
    } else {
        let mean = commits.iter().map(|c| c.total_lines).sum::<usize>() as f64
            / commits.len() as f64;
        (mean * 100.0).round() / 100.0
    };

    GlobalStats {
        total_commits: commits.len(),
        file_count,
        total_loc: records.len(),
        max_depth,
        avg_lines_per_commit,
        longest_line,
    }
}

/// `N commits selected`, with `No` standing in for zero.
pub fn selection_count_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{count} commits selected")
    }
}

/// Per-language line counts and percentages, in first-encounter order of the
/// language tags. An empty selection falls back to every active commit, so
/// the breakdown never goes blank just because nothing is brushed.
pub fn language_breakdown(selected: &[&Commit], active: &[Commit]) -> Vec<LangStat> {
    let fallback: Vec<&Commit>;
    let pool: &[&Commit] = if selected.is_empty() {
        fallback = active.iter().collect();
        &fallback
    } else {
        selected
    };

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;

    for commit in pool {
        for line in commit.lines() {
            let entry = counts.entry(line.language.as_str()).or_insert(0);
            if *entry == 0 {
                order.push(line.language.as_str());
            }
            *entry += 1;
            total += 1;
        }
    }

    order
        .into_iter()
        .map(|language| {
            let lines = counts[language];
            let percent = if total == 0 {
                0.0
            } else {
                (lines as f64 / total as f64 * 1000.0).round() / 10.0
            };
            LangStat {
                language: language.to_string(),
                lines,
                percent,
            }
        })
        .collect()
}

/// One file's slice of the active line records: the per-line language tags in
/// record order, rendered by the views as a run of colored unit marks.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBreakdown {
    pub file: String,
    pub languages: Vec<String>,
}

impl FileBreakdown {
    pub fn line_count(&self) -> usize {
        self.languages.len()
    }
}

/// Active lines grouped by file, sorted by descending line count. Ties keep
/// first-encounter order.
pub fn file_breakdown(commits: &[Commit]) -> Vec<FileBreakdown> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<String>> = HashMap::new();

    for commit in commits {
        for line in commit.lines() {
            let group = groups.entry(line.file.as_str()).or_default();
            if group.is_empty() {
                order.push(line.file.as_str());
            }
            group.push(line.language.clone());
        }
    }

    let mut entries: Vec<FileBreakdown> = order
        .into_iter()
        .map(|file| FileBreakdown {
            file: file.to_string(),
            languages: groups.remove(file).unwrap_or_default(),
        })
        .collect();

    entries.sort_by(|a, b| b.line_count().cmp(&a.line_count()));
    entries
}

pub fn file_entries(breakdown: &[FileBreakdown]) -> Vec<FileEntry> {
    breakdown
        .iter()
        .map(|entry| FileEntry {
            file: entry.file.clone(),
            lines: entry.line_count(),
        })
        .collect()
}

/// Stable ordinal color assignment: language → palette index, fixed at load
/// time over the full record sequence so colors do not shift as the cutoff
/// moves.
#[derive(Debug, Clone, Default)]
pub struct LanguagePalette {
    index: HashMap<String, usize>,
}

impl LanguagePalette {
    pub fn assign(records: &[LineRecord]) -> Self {
        let mut index = HashMap::new();
        for record in records {
            let next = index.len();
            index.entry(record.language.clone()).or_insert(next);
        }
        Self { index }
    }

    pub fn index_of(&self, language: &str) -> usize {
        self.index.get(language).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
