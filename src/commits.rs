use std::collections::HashMap;

use crate::model::{Commit, LineRecord};

/// Group line records into commits and sort ascending by `datetime`.
///
/// Grouping preserves first-appearance order before the sort, and every record
/// lands in exactly one commit, so the line counts always add back up to the
/// input length. The ascending sort is load-bearing: narrative text and cutoff
/// lookups index into this order.
pub fn process_commits(records: &[LineRecord], repo_url: Option<&str>) -> Vec<Commit> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<LineRecord>> = HashMap::new();

    for record in records {
        let group = groups.entry(record.commit.as_str()).or_default();
        if group.is_empty() {
            order.push(record.commit.as_str());
        }
        group.push(record.clone());
    }

    let mut commits: Vec<Commit> = order
        .into_iter()
        .filter_map(|id| groups.remove(id))
        .map(|lines| {
            let id = lines[0].commit.clone();
            let url = commit_url(repo_url, &id);
            Commit::new(id, url, lines)
        })
        .collect();

    commits.sort_by_key(|c| c.datetime);
    commits
}

fn commit_url(repo_url: Option<&str>, id: &str) -> Option<String> {
    repo_url.map(|base| format!("{}/commit/{}", base.trim_end_matches('/'), id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use pretty_assertions::assert_eq;

    fn record(commit: &str, file: &str, language: &str, datetime: &str) -> LineRecord {
        let datetime: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(datetime).unwrap();
        LineRecord {
            commit: commit.to_string(),
            file: file.to_string(),
            language: language.to_string(),
            line: 1.0,
            depth: 0.0,
            length: 40.0,
            author: "kai".to_string(),
            date: datetime,
            time: "10:30:00".to_string(),
            timezone: "+08:00".to_string(),
            datetime,
        }
    }

    #[test]
    fn every_record_is_grouped_exactly_once() {
        let records = vec![
            record("b", "a.rs", "rust", "2025-02-05T09:00:00+00:00"),
            record("a", "b.rs", "rust", "2025-02-04T08:00:00+00:00"),
            record("b", "c.rs", "rust", "2025-02-05T09:00:00+00:00"),
            record("a", "d.rs", "rust", "2025-02-04T08:00:00+00:00"),
            record("a", "e.rs", "rust", "2025-02-04T08:00:00+00:00"),
        ];

        let commits = process_commits(&records, None);
        let total: usize = commits.iter().map(|c| c.total_lines).sum();
        assert_eq!(total, records.len());
        assert_eq!(commits.len(), 2);
    }

    #[test]
    fn commits_sort_ascending_by_datetime() {
        let records = vec![
            record("late", "a.rs", "rust", "2025-02-06T09:00:00+00:00"),
            record("early", "b.rs", "rust", "2025-02-01T08:00:00+00:00"),
            record("mid", "c.rs", "rust", "2025-02-03T12:00:00+00:00"),
        ];

        let commits = process_commits(&records, None);
        let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "mid", "late"]);
        for pair in commits.windows(2) {
            assert!(pair[0].datetime <= pair[1].datetime);
        }
    }

    #[test]
    fn summary_fields_come_from_the_first_record() {
        let records = vec![
            record("a", "x.rs", "rust", "2025-02-04T10:30:00+08:00"),
            record("a", "y.rs", "rust", "2025-02-04T10:30:00+08:00"),
        ];

        let commits = process_commits(&records, Some("https://github.com/kai/repo/"));
        assert_eq!(commits.len(), 1);
        let commit = &commits[0];
        assert_eq!(commit.author, "kai");
        assert_eq!(commit.total_lines, 2);
        assert_eq!(commit.hour_frac, 10.5);
        assert_eq!(
            commit.url.as_deref(),
            Some("https://github.com/kai/repo/commit/a")
        );
    }

    #[test]
    fn line_payload_stays_out_of_serialization() {
        let records = vec![record("a", "x.rs", "rust", "2025-02-04T10:30:00+08:00")];
        let commits = process_commits(&records, None);

        let value = serde_json::to_value(&commits[0]).unwrap();
        assert!(value.get("lines").is_none());
        assert_eq!(value.get("total_lines").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(commits[0].lines().len(), 1);
    }
}
