use std::collections::HashMap;

use crate::model::Commit;
use crate::scale::Scales;
use crate::util::hour_label;

/// Frames an entering dot takes to grow from radius zero.
const ENTER_STEP: f64 = 0.25;

/// One plotted commit, keyed by commit id. `enter` is the grow-in progress of
/// a newly joined dot (1.0 once settled).
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub total_lines: usize,
    pub enter: f64,
}

impl Dot {
    pub fn drawn_radius(&self) -> f64 {
        self.radius * self.enter
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Renderable description of the scatter plot: dots in draw order plus axis
/// ticks (horizontal gridlines run at every y tick). Views paint this; the
/// scene itself never touches a terminal.
#[derive(Debug, Clone, Default)]
pub struct ScatterScene {
    pub dots: Vec<Dot>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl ScatterScene {
    /// Full draw: every dot settled, axes rebuilt.
    pub fn render(commits: &[Commit], scales: &Scales) -> Self {
        let mut scene = Self {
            dots: build_dots(commits, scales, 1.0),
            ..Self::default()
        };
        scene.rebuild_axes(scales);
        scene
    }

    /// Keyed reconciliation against the previous frame: entering ids grow in
    /// from radius zero, vanished ids drop out, persisting ids reposition
    /// while keeping their animation progress.
    pub fn update(&mut self, commits: &[Commit], scales: &Scales) {
        let previous: HashMap<String, f64> = self
            .dots
            .drain(..)
            .map(|dot| (dot.id, dot.enter))
            .collect();

        let mut dots = build_dots(commits, scales, 0.0);
        for dot in &mut dots {
            if let Some(&enter) = previous.get(&dot.id) {
                dot.enter = enter;
            }
        }

        self.dots = dots;
        self.rebuild_axes(scales);
    }

    /// Advance enter animations one frame. Returns true while any dot is
    /// still growing.
    pub fn tick(&mut self) -> bool {
        let mut animating = false;
        for dot in &mut self.dots {
            if dot.enter < 1.0 {
                dot.enter = (dot.enter + ENTER_STEP).min(1.0);
                animating = animating || dot.enter < 1.0;
            }
        }
        animating
    }

    /// Topmost dot under the pointer. Dots draw in descending line count, so
    /// the smallest overlapping dot (drawn last, on top) wins the hit.
    pub fn dot_at(&self, x: f64, y: f64) -> Option<&Dot> {
        self.dots.iter().rev().find(|dot| {
            let r = dot.drawn_radius().max(2.0);
            let dx = x - dot.x;
            let dy = y - dot.y;
            dx * dx + dy * dy <= r * r
        })
    }

    fn rebuild_axes(&mut self, scales: &Scales) {
        self.x_ticks = scales
            .x
            .ticks(6)
            .into_iter()
            .map(|t| AxisTick {
                position: scales.x.scale(t),
                label: t.format("%b %-d").to_string(),
            })
            .collect();

        self.y_ticks = (0..=24)
            .step_by(4)
            .map(|hour| AxisTick {
                position: scales.y.scale(hour as f64),
                label: hour_label(hour),
            })
            .collect();
    }
}

/// Dots in draw order: descending line count, so small dots land on top and
/// stay hoverable.
fn build_dots(commits: &[Commit], scales: &Scales, enter: f64) -> Vec<Dot> {
    let mut dots: Vec<Dot> = commits
        .iter()
        .map(|commit| Dot {
            id: commit.id.clone(),
            x: scales.x.scale(commit.datetime),
            y: scales.y.scale(commit.hour_frac),
            radius: scales.r.scale(commit.total_lines as f64),
            total_lines: commit.total_lines,
            enter,
        })
        .collect();
    dots.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
    dots
}

/// Tooltip state: hidden, or visible with content. Nothing in between.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tooltip {
    #[default]
    Hidden,
    Visible(TooltipContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub id: String,
    pub url: Option<String>,
    pub date: String,
    pub time: String,
    pub author: String,
    pub total_lines: usize,
}

impl TooltipContent {
    pub fn for_commit(commit: &Commit) -> Self {
        Self {
            id: commit.id.clone(),
            url: commit.url.clone(),
            date: commit.datetime.format("%A, %B %-d, %Y").to_string(),
            time: commit.time.clone(),
            author: commit.author.clone(),
            total_lines: commit.total_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::process_commits;
    use crate::model::LineRecord;
    use crate::scale::{PlotFrame, Scales};
    use chrono::DateTime;

    fn records(commit: &str, lines: usize, datetime: &str) -> Vec<LineRecord> {
        let datetime = DateTime::parse_from_rfc3339(datetime).unwrap();
        (0..lines)
            .map(|i| LineRecord {
                commit: commit.to_string(),
                file: "src/lib.rs".to_string(),
                language: "rust".to_string(),
                line: i as f64 + 1.0,
                depth: 0.0,
                length: 20.0,
                author: "kai".to_string(),
                date: datetime,
                time: "09:00:00".to_string(),
                timezone: "+00:00".to_string(),
                datetime,
            })
            .collect()
    }

    fn three_commits() -> Vec<Commit> {
        let mut all = Vec::new();
        all.extend(records("small", 2, "2025-03-01T09:00:00+00:00"));
        all.extend(records("mid", 10, "2025-03-03T12:00:00+00:00"));
        all.extend(records("big", 30, "2025-03-05T21:00:00+00:00"));
        process_commits(&all, None)
    }

    fn scene_and_scales() -> (ScatterScene, Scales, Vec<Commit>) {
        let commits = three_commits();
        let scales = Scales::compute(&commits, PlotFrame::new(1000.0, 600.0));
        let scene = ScatterScene::render(&commits, &scales);
        (scene, scales, commits)
    }

    #[test]
    fn dots_draw_largest_first() {
        let (scene, _, _) = scene_and_scales();
        let order: Vec<&str> = scene.dots.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, vec!["big", "mid", "small"]);
        assert!(scene.dots.iter().all(|d| d.enter == 1.0));
    }

    #[test]
    fn update_reconciles_by_commit_id() {
        let (mut scene, scales, commits) = scene_and_scales();

        // Drop "big": its dot must vanish, the others persist fully grown.
        let two: Vec<Commit> = commits.iter().filter(|c| c.id != "big").cloned().collect();
        let scales_two = Scales::compute(&two, PlotFrame::new(1000.0, 600.0));
        scene.update(&two, &scales_two);
        assert_eq!(scene.dots.len(), 2);
        assert!(scene.dots.iter().all(|d| d.enter == 1.0));

        // Bring "big" back: it enters at radius zero and grows via tick().
        scene.update(&commits, &scales);
        let big = scene.dots.iter().find(|d| d.id == "big").unwrap();
        assert_eq!(big.enter, 0.0);
        assert_eq!(big.drawn_radius(), 0.0);

        let mut steps = 0;
        while scene.tick() {
            steps += 1;
            assert!(steps < 20);
        }
        let big = scene.dots.iter().find(|d| d.id == "big").unwrap();
        assert_eq!(big.enter, 1.0);
    }

    #[test]
    fn hit_testing_prefers_the_topmost_small_dot() {
        let (mut scene, _, _) = scene_and_scales();

        // Stack a small dot directly on a large one.
        for dot in &mut scene.dots {
            dot.x = 100.0;
            dot.y = 100.0;
        }
        let hit = scene.dot_at(100.0, 100.0).unwrap();
        assert_eq!(hit.id, "small");
        assert!(scene.dot_at(500.0, 500.0).is_none());
    }

    #[test]
    fn y_axis_runs_from_bottom_to_top() {
        let (scene, _, _) = scene_and_scales();
        assert_eq!(scene.y_ticks.first().unwrap().label, "00:00");
        assert_eq!(scene.y_ticks.last().unwrap().label, "24:00");
        // Hour 0 is the bottom edge, so its pixel position is the largest.
        let first = scene.y_ticks.first().unwrap().position;
        let last = scene.y_ticks.last().unwrap().position;
        assert!(first > last);
    }

    #[test]
    fn tooltip_content_carries_the_commit_summary() {
        let (_, _, commits) = scene_and_scales();
        let content = TooltipContent::for_commit(&commits[0]);
        assert_eq!(content.id, "small");
        assert_eq!(content.author, "kai");
        assert_eq!(content.total_lines, 2);
        assert!(content.date.contains("March"));

        let tooltip = Tooltip::Visible(content);
        assert_ne!(tooltip, Tooltip::Hidden);
    }
}
