use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;

use crate::model::Commit;
use crate::scale::TimeScale;

/// Owner of the commit cutoff. The percent slider and the scroll narrative
/// are thin adapters over the single `set_cutoff` mutator, so both inputs
/// converge on identical state for the same timestamp.
#[derive(Debug, Clone)]
pub struct TimeCursor {
    slider: TimeScale,
    cutoff: Option<DateTime<FixedOffset>>,
}

impl TimeCursor {
    /// The slider scale spans *all* commits, not just the active ones.
    pub fn new(all_commits: &[Commit]) -> Self {
        let (t0, t1) = match (
            all_commits.iter().map(|c| c.datetime).min(),
            all_commits.iter().map(|c| c.datetime).max(),
        ) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
                (epoch, epoch)
            }
        };

        Self {
            slider: TimeScale::new((t0, t1), (0.0, 100.0)),
            cutoff: None,
        }
    }

    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        self.cutoff
    }

    pub fn set_cutoff(&mut self, cutoff: DateTime<FixedOffset>) {
        self.cutoff = Some(cutoff);
    }

    pub fn clear(&mut self) {
        self.cutoff = None;
    }

    /// Slider adapter: position in `[0, 100]` inverted to a timestamp.
    pub fn set_percent(&mut self, percent: f64) {
        let percent = percent.clamp(0.0, 100.0);
        self.set_cutoff(self.slider.invert(percent));
    }

    /// Narrative adapter: focusing a commit's paragraph cuts off at it.
    pub fn set_commit(&mut self, commit: &Commit) {
        self.set_cutoff(commit.datetime);
    }

    /// Current slider position; the slider rests at 100 with no cutoff.
    pub fn percent(&self) -> f64 {
        match self.cutoff {
            Some(cutoff) => self.slider.scale(cutoff).clamp(0.0, 100.0),
            None => 100.0,
        }
    }

    /// Commits with `datetime <= cutoff`, as a freshly built vector. No
    /// cutoff means everything is active.
    pub fn active(&self, commits: &[Commit]) -> Vec<Commit> {
        match self.cutoff {
            Some(cutoff) => commits
                .iter()
                .filter(|c| c.datetime <= cutoff)
                .cloned()
                .collect(),
            None => commits.to_vec(),
        }
    }
}

/// One narrative paragraph per commit, in sorted order. The first paragraph
/// is worded as the project's opening commit.
pub fn narrative(commits: &[Commit]) -> Vec<String> {
    commits
        .iter()
        .enumerate()
        .map(|(i, commit)| {
            let when = commit.datetime.format("%A, %B %-d, %Y at %H:%M");
            let files = commit
                .lines()
                .iter()
                .map(|l| l.file.as_str())
                .collect::<HashSet<_>>()
                .len();
            if i == 0 {
                format!(
                    "On {when}, {} made the project's first commit, editing {} lines across {} files.",
                    commit.author, commit.total_lines, files
                )
            } else {
                format!(
                    "On {when}, {} followed up with another {} lines across {} files.",
                    commit.author, commit.total_lines, files
                )
            }
        })
        .collect()
}
