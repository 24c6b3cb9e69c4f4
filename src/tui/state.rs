use ratatui::layout::Rect;
use std::time::Instant;

use crate::cursor::TimeCursor;
use crate::model::{Commit, LineRecord};
use crate::scale::Scales;
use crate::scatter::{ScatterScene, Tooltip, TooltipContent};
use crate::select::{selected_commits, BrushRect};
use crate::summary::LanguagePalette;

use super::layout::frame_for;

#[derive(Clone, Copy, PartialEq)]
pub enum ViewMode {
    Plot,
    Stats,
    Files,
    Story,
}

/// Page-session state: the full commit set plus everything derived from the
/// current cutoff, brush, and chart area. All mutators recompute their
/// dependents before returning, so a draw never observes a half-updated
/// frame.
pub struct TuiState {
    pub commits: Vec<Commit>,
    pub story: Vec<String>,
    pub palette: LanguagePalette,

    pub cursor: TimeCursor,
    pub active: Vec<Commit>,
    pub active_records: Vec<LineRecord>,
    pub scales: Scales,
    pub scene: ScatterScene,

    pub selection: Option<BrushRect>,
    pub selection_count: usize,
    pub tooltip: Tooltip,

    pub view_mode: ViewMode,
    pub tab_index: usize,
    pub show_help: bool,
    pub story_index: usize,
    pub files_scroll: usize,
    pub chart_area: Rect,
    pub status_message: Option<(String, Instant)>,
}

impl TuiState {
    pub fn new(commits: Vec<Commit>, palette: LanguagePalette) -> Self {
        let cursor = TimeCursor::new(&commits);
        let active = cursor.active(&commits);
        let active_records = flatten(&active);
        let chart_area = Rect::new(0, 0, 80, 24);
        let scales = Scales::compute(&active, frame_for(chart_area));
        let scene = ScatterScene::render(&active, &scales);
        let story = crate::cursor::narrative(&commits);
        let story_index = commits.len().saturating_sub(1);

        Self {
            commits,
            story,
            palette,
            cursor,
            active,
            active_records,
            scales,
            scene,
            selection: None,
            selection_count: 0,
            tooltip: Tooltip::Hidden,
            view_mode: ViewMode::Plot,
            tab_index: 0,
            show_help: false,
            story_index,
            files_scroll: 0,
            chart_area,
            status_message: None,
        }
    }

    /// Re-derive the active set and every downstream view input from the
    /// current cutoff. Runs synchronously inside the triggering callback.
    fn apply_cutoff(&mut self) {
        self.active = self.cursor.active(&self.commits);
        self.active_records = flatten(&self.active);
        self.scales = Scales::compute(&self.active, frame_for(self.chart_area));
        self.scene.update(&self.active, &self.scales);
        self.refresh_selection();
        self.tooltip = Tooltip::Hidden;
    }

    pub fn set_cutoff(&mut self, cutoff: chrono::DateTime<chrono::FixedOffset>) {
        self.cursor.set_cutoff(cutoff);
        self.apply_cutoff();
    }

    pub fn set_cutoff_percent(&mut self, percent: f64) {
        self.cursor.set_percent(percent);
        self.apply_cutoff();
    }

    pub fn nudge_slider(&mut self, delta: f64) {
        self.set_cutoff_percent(self.cursor.percent() + delta);
    }

    pub fn reset_cutoff(&mut self) {
        self.cursor.clear();
        self.apply_cutoff();
    }

    /// Scroll-narrative adapter: focusing paragraph `index` cuts off at that
    /// commit.
    pub fn focus_story(&mut self, index: usize) {
        if self.commits.is_empty() {
            return;
        }
        let index = index.min(self.commits.len() - 1);
        self.story_index = index;
        let commit = self.commits[index].clone();
        self.cursor.set_commit(&commit);
        self.apply_cutoff();
    }

    /// Called from draw when the chart area changed (startup or resize).
    pub fn resize_chart(&mut self, area: Rect) {
        if area == self.chart_area {
            return;
        }
        self.chart_area = area;
        self.scales = Scales::compute(&self.active, frame_for(area));
        self.scene.update(&self.active, &self.scales);
        self.refresh_selection();
    }

    pub fn brush_start(&mut self, x: f64, y: f64) {
        self.selection = Some(BrushRect::new(x, y));
        self.refresh_selection();
    }

    pub fn brush_drag(&mut self, x: f64, y: f64) {
        if let Some(rect) = self.selection.as_mut() {
            rect.drag_to(x, y);
        }
        self.refresh_selection();
    }

    pub fn brush_end(&mut self, x: f64, y: f64) {
        if let Some(rect) = self.selection.as_mut() {
            rect.drag_to(x, y);
        }
        self.refresh_selection();
    }

    pub fn clear_brush(&mut self) {
        self.selection = None;
        self.refresh_selection();
    }

    /// Re-evaluate brush membership over the active commits. Runs on every
    /// brush phase and after any cutoff or resize recompute.
    fn refresh_selection(&mut self) {
        self.selection_count =
            selected_commits(self.selection.as_ref(), &self.scales, &self.active).len();
    }

    pub fn hover(&mut self, x: f64, y: f64) {
        let hit = self.scene.dot_at(x, y).map(|dot| dot.id.clone());
        self.tooltip = match hit {
            Some(id) => self
                .active
                .iter()
                .find(|c| c.id == id)
                .map(TooltipContent::for_commit)
                .map(Tooltip::Visible)
                .unwrap_or(Tooltip::Hidden),
            None => Tooltip::Hidden,
        };
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn selected(&self) -> Vec<&Commit> {
        selected_commits(self.selection.as_ref(), &self.scales, &self.active)
    }
}

fn flatten(active: &[Commit]) -> Vec<LineRecord> {
    active
        .iter()
        .flat_map(|c| c.lines().iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commits::process_commits;
    use chrono::DateTime;

    fn state_with_three_commits() -> TuiState {
        let mut records = Vec::new();
        for (commit, datetime) in [
            ("a", "2025-04-01T09:00:00+00:00"),
            ("b", "2025-04-03T13:00:00+00:00"),
            ("c", "2025-04-05T20:00:00+00:00"),
        ] {
            let datetime = DateTime::parse_from_rfc3339(datetime).unwrap();
            for i in 0..4 {
                records.push(LineRecord {
                    commit: commit.to_string(),
                    file: format!("src/{commit}.rs"),
                    language: "rust".to_string(),
                    line: i as f64 + 1.0,
                    depth: 0.0,
                    length: 30.0,
                    author: "kai".to_string(),
                    date: datetime,
                    time: "09:00:00".to_string(),
                    timezone: "+00:00".to_string(),
                    datetime,
                });
            }
        }
        let palette = LanguagePalette::assign(&records);
        let commits = process_commits(&records, None);
        let mut state = TuiState::new(commits, palette);
        state.resize_chart(Rect::new(0, 0, 100, 50));
        state
    }

    #[test]
    fn brush_phases_reevaluate_the_selection() {
        let mut state = state_with_three_commits();
        let frame = frame_for(state.chart_area);

        state.brush_start(0.0, 0.0);
        assert_eq!(state.selection_count, 0);

        state.brush_drag(frame.width, frame.height);
        assert_eq!(state.selection_count, 3);

        state.brush_end(frame.width / 100.0, frame.height);
        assert!(state.selection_count < 3);

        state.clear_brush();
        assert_eq!(state.selection_count, 0);
        assert!(state.selection.is_none());
    }

    #[test]
    fn slider_and_story_adapters_converge() {
        let mut via_story = state_with_three_commits();
        via_story.focus_story(1);

        let mut via_slider = state_with_three_commits();
        let percent = {
            let mut probe = TimeCursor::new(&via_slider.commits);
            probe.set_cutoff(via_slider.commits[1].datetime);
            probe.percent()
        };
        via_slider.set_cutoff_percent(percent);

        let story_ids: Vec<&str> = via_story.active.iter().map(|c| c.id.as_str()).collect();
        let slider_ids: Vec<&str> = via_slider.active.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(story_ids, slider_ids);
        assert_eq!(story_ids, vec!["a", "b"]);
        assert_eq!(via_story.scales, via_slider.scales);
        assert_eq!(via_story.scene.dots.len(), via_slider.scene.dots.len());
    }

    #[test]
    fn cutoff_rebuilds_scene_and_selection() {
        let mut state = state_with_three_commits();
        let frame = frame_for(state.chart_area);
        state.brush_start(0.0, 0.0);
        state.brush_drag(frame.width, frame.height);
        assert_eq!(state.selection_count, 3);

        state.focus_story(0);
        assert_eq!(state.active.len(), 1);
        // The brush rect survives but membership re-evaluates over the new set.
        assert_eq!(state.selection_count, 1);
        assert_eq!(state.scene.dots.len(), 1);

        state.reset_cutoff();
        assert_eq!(state.active.len(), 3);
    }
}
