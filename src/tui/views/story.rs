use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::super::state::TuiState;

/// Render the scroll narrative: one paragraph per commit in sorted order.
/// The focused paragraph drives the cutoff, so scrolling here replays the
/// project's history in every other view.
pub fn draw_story_view(f: &mut Frame, area: Rect, state: &TuiState) {
    if state.story.is_empty() {
        let placeholder = Paragraph::new("No commits to narrate")
            .block(Block::default().title("Story").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, paragraph) in state.story.iter().enumerate() {
        let style = if i == state.story_index {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if i <= state.story_index {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::styled(paragraph.clone(), style));
        lines.push(Line::from(""));
    }

    let view_height = area.height.saturating_sub(2) as usize;
    let focused_line = state.story_index * 2;
    let scroll = focused_line.saturating_sub(view_height / 2) as u16;

    let title = format!(
        "Story  ({}/{} commits, ↑/↓ to travel)",
        state.story_index + 1,
        state.story.len()
    );
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
