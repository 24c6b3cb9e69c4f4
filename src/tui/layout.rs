use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::scale::PlotFrame;

/// Logical plot pixels per terminal cell. Mouse positions and dot radii meet
/// in this one coordinate space.
pub const PX_PER_CELL: f64 = 8.0;

pub fn frame_for(area: Rect) -> PlotFrame {
    PlotFrame::new(
        area.width as f64 * PX_PER_CELL,
        area.height as f64 * PX_PER_CELL,
    )
}

/// Map a terminal mouse position into plot pixels, or `None` when the pointer
/// is outside the chart.
pub fn mouse_to_px(area: Rect, column: u16, row: u16) -> Option<(f64, f64)> {
    if column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let x = (column - area.x) as f64 * PX_PER_CELL + PX_PER_CELL / 2.0;
    let y = (row - area.y) as f64 * PX_PER_CELL + PX_PER_CELL / 2.0;
    Some((x, y))
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_mapping_respects_chart_bounds() {
        let area = Rect::new(2, 3, 10, 5);
        assert!(mouse_to_px(area, 1, 4).is_none());
        assert!(mouse_to_px(area, 12, 4).is_none());

        let (x, y) = mouse_to_px(area, 2, 3).unwrap();
        assert_eq!(x, PX_PER_CELL / 2.0);
        assert_eq!(y, PX_PER_CELL / 2.0);
    }
}
