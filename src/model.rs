use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One changed source line, attributed to a commit. Produced once by the loader
/// and immutable afterwards.
///
/// `line`, `depth`, and `length` are lenient: a malformed field in the log
/// becomes `NaN` rather than failing the load, and every aggregation skips
/// non-finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub commit: String,
    pub file: String,
    pub language: String,
    pub line: f64,
    pub depth: f64,
    pub length: f64,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// Aggregate of all records sharing a commit id. Summary fields come from the
/// first constituent record; the owned line payload is bulk data and stays out
/// of serialization and equality.
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub id: String,
    pub url: Option<String>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    lines: Vec<LineRecord>,
}

impl Commit {
    /// Assemble a commit from its line records. `lines` must be non-empty; the
    /// aggregator only creates a group when a record for it exists.
    pub fn new(id: String, url: Option<String>, lines: Vec<LineRecord>) -> Self {
        use chrono::Timelike;

        let first = &lines[0];
        let hour_frac = first.datetime.hour() as f64 + first.datetime.minute() as f64 / 60.0;
        Self {
            id,
            url,
            author: first.author.clone(),
            date: first.date,
            time: first.time.clone(),
            timezone: first.timezone.clone(),
            datetime: first.datetime,
            hour_frac,
            total_lines: lines.len(),
            lines,
        }
    }

    /// Bulk line payload, excluded from the serialized summary.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }
}

impl PartialEq for Commit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.author == other.author
            && self.datetime == other.datetime
            && self.hour_frac == other.hour_frac
            && self.total_lines == other.total_lines
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_commits: usize,
    pub file_count: usize,
    pub total_loc: usize,
    pub max_depth: u64,
    pub avg_lines_per_commit: f64,
    pub longest_line: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangStat {
    pub language: String,
    pub lines: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub file: String,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub cutoff: Option<String>,
    pub stats: GlobalStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub cutoff: Option<String>,
    pub entries: Vec<LangStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub cutoff: Option<String>,
    pub entries: Vec<FileEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub log_path: String,
    pub cutoff: Option<String>,
    pub entries: Vec<Commit>,
}
