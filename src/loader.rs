use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::Path;

use crate::error::{PunchcardError, Result};
use crate::model::LineRecord;
use crate::util::parse_offset;

const REQUIRED_COLUMNS: [&str; 11] = [
    "commit", "file", "type", "line", "depth", "length", "author", "date", "time", "timezone",
    "datetime",
];

/// Raw CSV row. Everything is read as text; the typed mapping happens in
/// `parse_row` so coercion rules stay explicit.
#[derive(Debug, Deserialize)]
struct RawRecord {
    commit: String,
    file: String,
    #[serde(rename = "type")]
    language: String,
    #[serde(default)]
    line: String,
    #[serde(default)]
    depth: String,
    #[serde(default)]
    length: String,
    author: String,
    date: String,
    time: String,
    timezone: String,
    datetime: String,
}

/// Load the line-level commit log. The file being unreachable or missing a
/// required column is a hard error; individual malformed rows are skipped and
/// reported as a warning count.
pub fn load(path: &Path) -> Result<Vec<LineRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PunchcardError::Log(format!(
                "{}: missing required column '{column}'",
                path.display()
            )));
        }
    }

    let pb = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading commit log...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<RawRecord>() {
        match row {
            Ok(raw) => match parse_row(raw) {
                Some(record) => records.push(record),
                None => skipped += 1,
            },
            Err(_) => skipped += 1,
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    if skipped > 0 {
        eprintln!(
            "{} skipped {skipped} malformed row(s) in {}",
            style("warning:").yellow().bold(),
            path.display()
        );
    }

    Ok(records)
}

/// Map a raw row to a typed record. Numeric fields coerce leniently to `NaN`;
/// a row without a usable `datetime` has no position on any axis and is
/// dropped.
fn parse_row(raw: RawRecord) -> Option<LineRecord> {
    let datetime = parse_datetime(&raw.datetime)?;
    let offset = parse_offset(&raw.timezone).unwrap_or(*datetime.offset());
    let date = midnight(&raw.date, offset).unwrap_or_else(|| {
        let naive = datetime.date_naive().and_hms_opt(0, 0, 0);
        naive
            .and_then(|n| offset.from_local_datetime(&n).single())
            .unwrap_or(datetime)
    });

    Some(LineRecord {
        commit: raw.commit,
        file: raw.file,
        language: raw.language,
        line: lenient_num(&raw.line),
        depth: lenient_num(&raw.depth),
        length: lenient_num(&raw.length),
        author: raw.author,
        date,
        time: raw.time,
        timezone: raw.timezone,
        datetime,
    })
}

fn parse_datetime(input: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// `date` + `timezone` combined into a midnight timestamp.
fn midnight(date: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let naive = naive.and_hms_opt(0, 0, 0)?;
    offset.from_local_datetime(&naive).single()
}

fn lenient_num(input: &str) -> f64 {
    input.trim().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "commit,file,type,line,depth,length,author,date,time,timezone,datetime";

    fn write_log(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_typed_records() {
        let file = write_log(&[
            "abc123,src/main.rs,rust,1,0,42,kai,2025-02-04,10:30:00,+08:00,2025-02-04T10:30:00+08:00",
        ]);

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.commit, "abc123");
        assert_eq!(rec.language, "rust");
        assert_eq!(rec.line, 1.0);
        assert_eq!(rec.length, 42.0);
        assert_eq!(rec.datetime.to_rfc3339(), "2025-02-04T10:30:00+08:00");
        assert_eq!(rec.date.to_rfc3339(), "2025-02-04T00:00:00+08:00");
    }

    #[test]
    fn malformed_numbers_coerce_to_nan() {
        let file = write_log(&[
            "abc123,src/main.rs,rust,oops,,x,kai,2025-02-04,10:30:00,+08:00,2025-02-04T10:30:00+08:00",
        ]);

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].line.is_nan());
        assert!(records[0].depth.is_nan());
        assert!(records[0].length.is_nan());
    }

    #[test]
    fn rows_without_datetime_are_skipped() {
        let file = write_log(&[
            "abc123,a.rs,rust,1,0,10,kai,2025-02-04,10:30:00,+08:00,2025-02-04T10:30:00+08:00",
            "def456,b.rs,rust,2,0,10,kai,2025-02-05,11:00:00,+08:00,not-a-timestamp",
        ]);

        let records = load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].commit, "abc123");
    }

    #[test]
    fn missing_column_is_a_hard_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "commit,file,author").unwrap();
        writeln!(file, "abc,a.rs,kai").unwrap();
        file.flush().unwrap();

        assert!(load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        assert!(load(Path::new("/nonexistent/loc.csv")).is_err());
    }
}
