use crate::model::Commit;
use crate::scale::Scales;

/// Brush rectangle in plot-pixel space. `(x0, y0)` is where the drag started;
/// the corners are normalized on every test, so dragging up-left works the
/// same as down-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x0: x, y0: y, x1: x, y1: y }
    }

    pub fn drag_to(&mut self, x: f64, y: f64) {
        self.x1 = x;
        self.y1 = y;
    }

    pub fn normalized(&self) -> (f64, f64, f64, f64) {
        (
            self.x0.min(self.x1),
            self.y0.min(self.y1),
            self.x0.max(self.x1),
            self.y0.max(self.y1),
        )
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, y0, x1, y1) = self.normalized();
        x >= x0 && x <= x1 && y >= y0 && y <= y1
    }
}

/// True iff a brush is active and the commit's plotted position falls inside
/// it, bounds inclusive. Always evaluated against the current scales.
pub fn is_selected(rect: Option<&BrushRect>, scales: &Scales, commit: &Commit) -> bool {
    let Some(rect) = rect else {
        return false;
    };
    let x = scales.x.scale(commit.datetime);
    let y = scales.y.scale(commit.hour_frac);
    rect.contains(x, y)
}

/// Commits in `commits` currently inside the brush.
pub fn selected_commits<'a>(
    rect: Option<&BrushRect>,
    scales: &Scales,
    commits: &'a [Commit],
) -> Vec<&'a Commit> {
    commits
        .iter()
        .filter(|c| is_selected(rect, scales, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineRecord;
    use crate::scale::{LinearScale, PlotFrame, Scales, SqrtScale, TimeScale};
    use chrono::{DateTime, FixedOffset};

    fn dt(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn commit_at(datetime: &str, hour_frac: f64) -> Commit {
        let datetime = dt(datetime);
        let record = LineRecord {
            commit: "c".to_string(),
            file: "a.rs".to_string(),
            language: "rust".to_string(),
            line: 1.0,
            depth: 0.0,
            length: 10.0,
            author: "kai".to_string(),
            date: datetime,
            time: "00:00:00".to_string(),
            timezone: "+00:00".to_string(),
            datetime,
        };
        let mut commit = Commit::new("c".to_string(), None, vec![record]);
        commit.hour_frac = hour_frac;
        commit
    }

    fn pixel_scales() -> Scales {
        // x: 10 days over 100px, y: 24h over 100px (inverted).
        Scales {
            x: TimeScale::new(
                (dt("2025-02-01T00:00:00+00:00"), dt("2025-02-11T00:00:00+00:00")),
                (0.0, 100.0),
            ),
            y: LinearScale::new((0.0, 24.0), (100.0, 0.0)),
            r: SqrtScale::new((1.0, 40.0), (2.0, 30.0)),
            frame: PlotFrame::new(120.0, 140.0),
        }
    }

    #[test]
    fn commit_inside_rect_is_selected() {
        let scales = pixel_scales();
        let rect = BrushRect { x0: 0.0, y0: 0.0, x1: 100.0, y1: 100.0 };
        // Midpoint of the time domain, noon: plotted at (50, 50).
        let commit = commit_at("2025-02-06T00:00:00+00:00", 12.0);
        assert!(is_selected(Some(&rect), &scales, &commit));
    }

    #[test]
    fn commit_outside_rect_is_not_selected() {
        let scales = pixel_scales();
        let rect = BrushRect { x0: 0.0, y0: 0.0, x1: 100.0, y1: 100.0 };
        // 15 days in: plotted at x = 150.
        let commit = commit_at("2025-02-16T00:00:00+00:00", 12.0);
        assert!(!is_selected(Some(&rect), &scales, &commit));
    }

    #[test]
    fn no_brush_selects_nothing() {
        let scales = pixel_scales();
        let commit = commit_at("2025-02-06T00:00:00+00:00", 12.0);
        assert!(!is_selected(None, &scales, &commit));
    }

    #[test]
    fn bounds_are_inclusive() {
        let scales = pixel_scales();
        let rect = BrushRect { x0: 50.0, y0: 50.0, x1: 100.0, y1: 100.0 };
        let commit = commit_at("2025-02-06T00:00:00+00:00", 12.0);
        assert!(is_selected(Some(&rect), &scales, &commit));
    }

    #[test]
    fn rects_normalize_regardless_of_drag_direction() {
        let mut rect = BrushRect::new(80.0, 90.0);
        rect.drag_to(20.0, 10.0);
        assert!(rect.contains(50.0, 50.0));
        assert!(!rect.contains(10.0, 50.0));
    }
}
