use std::collections::BTreeMap;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline};
use ratatui::Frame;

use crate::summary::global_stats;

use super::super::state::TuiState;

/// Render the aggregate statistics for the active commit set, with a
/// commits-per-day trend sparkline.
pub fn draw_stats_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(12), Constraint::Length(6)])
        .split(area);

    let stats = global_stats(&state.active_records, &state.active);

    let stats_text = vec![
        Line::from(vec![Span::styled(
            "Commit Log Statistics",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total commits: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", stats.total_commits),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Number of files: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", stats.file_count),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Total LOC: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", stats.total_loc),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Max depth: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", stats.max_depth),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "Average lines per commit: ",
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{}", stats.avg_lines_per_commit),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Longest line: ", Style::default().fg(Color::White)),
            Span::styled(
                format!("{}", stats.longest_line),
                Style::default().fg(Color::Blue),
            ),
        ]),
    ];

    let stats_para = Paragraph::new(stats_text).block(
        Block::default()
            .title("Overall Statistics")
            .borders(Borders::ALL),
    );
    f.render_widget(stats_para, chunks[0]);

    let mut per_day: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for commit in &state.active {
        *per_day.entry(commit.datetime.date_naive()).or_insert(0) += 1;
    }
    let trend: Vec<u64> = per_day.into_values().collect();

    if trend.len() > 1 {
        let sparkline = Sparkline::default()
            .block(
                Block::default()
                    .title("Commits per day")
                    .borders(Borders::ALL),
            )
            .data(&trend)
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(sparkline, chunks[1]);
    }
}
