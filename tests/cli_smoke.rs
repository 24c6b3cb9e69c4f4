use assert_cmd::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const HEADER: &str = "commit,file,type,line,depth,length,author,date,time,timezone,datetime";

fn write_line(file: &mut File, commit: &str, path: &str, language: &str, line: usize, date: &str, time: &str) {
    writeln!(
        file,
        "{commit},{path},{language},{line},1,40,kai,{date},{time},+00:00,{date}T{time}+00:00"
    )
    .unwrap();
}

/// Five commits with line counts [10, 20, 5, 40, 15] on distinct dates.
fn write_sample_log(dir: &Path) -> PathBuf {
    let path = dir.join("loc.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();

    let commits = [
        ("c1", 10, "2025-01-01", "10:00:00", "rust"),
        ("c2", 20, "2025-01-03", "11:30:00", "rust"),
        ("c3", 5, "2025-01-05", "12:00:00", "js"),
        ("c4", 40, "2025-01-07", "21:15:00", "rust"),
        ("c5", 15, "2025-01-09", "08:45:00", "css"),
    ];
    for (commit, lines, date, time, language) in commits {
        for i in 0..lines {
            let path = format!("src/{commit}_{}.rs", i % 3);
            write_line(&mut file, commit, &path, language, i + 1, date, time);
        }
    }
    file.flush().unwrap();
    path
}

#[test]
fn stats_json_reports_totals() {
    let dir = tempdir().unwrap();
    let log = write_sample_log(dir.path());

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log").arg(&log).args(["stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["stats"]["total_commits"].as_u64(), Some(5));
    assert_eq!(v["stats"]["total_loc"].as_u64(), Some(90));
    assert_eq!(v["stats"]["longest_line"].as_u64(), Some(40));
}

#[test]
fn cutoff_keeps_the_three_earliest_commits() {
    let dir = tempdir().unwrap();
    let log = write_sample_log(dir.path());

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log")
        .arg(&log)
        .arg("--cutoff")
        .arg("2025-01-05T12:00:00+00:00")
        .args(["export", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let total: u64 = entries
        .iter()
        .map(|e| e["total_lines"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 10 + 20 + 5);
    // The line payload stays out of the serialized summary.
    assert!(entries.iter().all(|e| e.get("lines").is_none()));
}

#[test]
fn langs_percentages_sum_to_one_hundred() {
    let dir = tempdir().unwrap();
    let log = write_sample_log(dir.path());

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log")
        .arg(&log)
        .arg("--cutoff")
        .arg("2025-01-05T12:00:00+00:00")
        .args(["langs", "--ndjson"]);
    let out = cmd.assert().success().get_output().stdout.clone();

    let mut sum = 0.0;
    let mut languages = Vec::new();
    for line in out.split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
        let v: serde_json::Value = serde_json::from_slice(line).unwrap();
        sum += v["percent"].as_f64().unwrap();
        languages.push(v["language"].as_str().unwrap().to_string());
    }
    assert!((sum - 100.0).abs() <= 0.5);
    assert_eq!(languages, vec!["rust", "js"]);
}

#[test]
fn files_listing_sorts_by_descending_line_count() {
    let dir = tempdir().unwrap();
    let log = write_sample_log(dir.path());

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log").arg(&log).args(["files", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    let counts: Vec<u64> = entries
        .iter()
        .map(|e| e["lines"].as_u64().unwrap())
        .collect();
    let mut sorted = counts.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(counts, sorted);
}

#[test]
fn plot_renders_axes_for_a_single_commit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("solo.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for i in 0..3 {
        write_line(&mut file, "only", "src/lib.rs", "rust", i + 1, "2025-02-04", "10:30:00");
    }
    file.flush().unwrap();

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log").arg(&path).arg("plot");
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&out);

    assert!(text.contains("00:00"));
    assert!(text.contains("(1 commits)"));
}

#[test]
fn missing_log_fails_with_context() {
    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log").arg("/nonexistent/loc.csv").arg("stats");
    let out = cmd.assert().failure().get_output().stderr.clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Failed to read commit log"));
}

#[test]
fn malformed_rows_are_tolerated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("messy.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    write_line(&mut file, "good", "src/lib.rs", "rust", 1, "2025-02-04", "10:30:00");
    // Unparseable numerics coerce; a broken datetime drops the row.
    writeln!(file, "good,src/lib.rs,rust,oops,,??,kai,2025-02-04,10:30:00,+00:00,2025-02-04T10:30:00+00:00").unwrap();
    writeln!(file, "bad,src/lib.rs,rust,1,1,40,kai,2025-02-05,11:00:00,+00:00,not-a-timestamp").unwrap();
    file.flush().unwrap();

    let mut cmd = Command::cargo_bin("punchcard").unwrap();
    cmd.arg("--log").arg(&path).args(["stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["stats"]["total_commits"].as_u64(), Some(1));
    assert_eq!(v["stats"]["total_loc"].as_u64(), Some(2));
    // The row with NaN length is skipped by the extent, not counted as zero.
    assert_eq!(v["stats"]["longest_line"].as_u64(), Some(40));
}
