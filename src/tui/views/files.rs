use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::summary::file_breakdown;

use super::super::state::TuiState;

/// Mark colors cycle through this palette by the language's stable ordinal
/// index; mirrors the CLI listing palette.
const MARK_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Render the per-file breakdown: descending line count, one colored unit
/// mark per line.
pub fn draw_files_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let breakdown = file_breakdown(&state.active);

    if breakdown.is_empty() {
        let placeholder = Paragraph::new("No data")
            .block(Block::default().title("Files").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let marks_per_row = area.width.saturating_sub(4).max(8) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for entry in &breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                entry.file.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} lines)", entry.line_count()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        for chunk in entry.languages.chunks(marks_per_row) {
            let marks: Vec<Span> = chunk
                .iter()
                .map(|language| {
                    let color =
                        MARK_COLORS[state.palette.index_of(language) % MARK_COLORS.len()];
                    Span::styled("▪", Style::default().fg(color))
                })
                .collect();
            lines.push(Line::from(marks));
        }
        lines.push(Line::from(""));
    }

    let scroll = state.files_scroll.min(lines.len().saturating_sub(1)) as u16;
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title("Files by lines touched  (↑/↓ to scroll)")
                .borders(Borders::ALL),
        )
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}
