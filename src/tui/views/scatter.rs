use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::scatter::Tooltip;
use crate::summary::{language_breakdown, selection_count_label};
use crate::util::format_percent;

use super::super::state::TuiState;

/// Render the scatter tab: chart with brush overlay, time slider, and the
/// selection-driven side panels.
pub fn draw_plot_view(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(columns[0]);

    draw_chart(f, left[0], state);
    draw_slider(f, left[1], state);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(9),
        ])
        .split(columns[1]);

    draw_selection_count(f, sidebar[0], state);
    draw_language_breakdown(f, sidebar[1], state);
    draw_tooltip(f, sidebar[2], state);
}

fn draw_chart(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let block = Block::default()
        .title("Commits by time of day")
        .borders(Borders::ALL);
    let inner = block.inner(area);

    if inner.width == 0 || inner.height == 0 {
        f.render_widget(block, area);
        return;
    }

    // Scales follow the drawable area; recompute happens before painting.
    state.resize_chart(inner);

    let frame = crate::tui::layout::frame_for(inner);
    let height = frame.height;
    let scene = &state.scene;
    let selection = state.selection;
    let hovered = match &state.tooltip {
        Tooltip::Visible(content) => Some(content.id.clone()),
        Tooltip::Hidden => None,
    };

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([0.0, frame.width])
        .y_bounds([0.0, height])
        .marker(ratatui::symbols::Marker::Braille)
        .paint(|ctx| {
            for tick in &scene.y_ticks {
                ctx.draw(&CanvasLine {
                    x1: frame.left(),
                    y1: height - tick.position,
                    x2: frame.right(),
                    y2: height - tick.position,
                    color: Color::DarkGray,
                });
            }

            for dot in &scene.dots {
                let selected = selection
                    .as_ref()
                    .map(|rect| rect.contains(dot.x, dot.y))
                    .unwrap_or(false);
                let color = if hovered.as_deref() == Some(dot.id.as_str()) {
                    Color::White
                } else if selected {
                    Color::Yellow
                } else {
                    Color::Cyan
                };
                ctx.draw(&Circle {
                    x: dot.x,
                    y: height - dot.y,
                    radius: dot.drawn_radius(),
                    color,
                });
            }

            if let Some(rect) = selection.as_ref() {
                let (x0, y0, x1, y1) = rect.normalized();
                ctx.draw(&Rectangle {
                    x: x0,
                    y: height - y1,
                    width: x1 - x0,
                    height: y1 - y0,
                    color: Color::Magenta,
                });
            }

            for tick in &scene.y_ticks {
                ctx.print(
                    0.0,
                    height - tick.position,
                    Line::from(Span::styled(
                        tick.label.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                );
            }
            for tick in &scene.x_ticks {
                ctx.print(
                    tick.position,
                    2.0,
                    Line::from(Span::styled(
                        tick.label.clone(),
                        Style::default().fg(Color::Gray),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn draw_slider(f: &mut Frame, area: Rect, state: &TuiState) {
    let readout = match state.cursor.cutoff() {
        Some(cutoff) => format!("through {}", cutoff.format("%Y-%m-%d %H:%M")),
        None => "all commits".to_string(),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title("Time range  (←/→ to adjust, r to reset)")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((state.cursor.percent() / 100.0).clamp(0.0, 1.0))
        .label(readout);
    f.render_widget(gauge, area);
}

fn draw_selection_count(f: &mut Frame, area: Rect, state: &TuiState) {
    let label = selection_count_label(state.selection_count);
    let paragraph = Paragraph::new(label)
        .block(Block::default().title("Selection").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_language_breakdown(f: &mut Frame, area: Rect, state: &TuiState) {
    let selected = state.selected();
    let breakdown = language_breakdown(&selected, &state.active);

    let mut lines = Vec::new();
    for entry in &breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", entry.language),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:>6} lines ", entry.lines)),
            Span::styled(
                format!("({})", format_percent(entry.percent)),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from("No data"));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Language breakdown")
            .borders(Borders::ALL),
    );
    f.render_widget(paragraph, area);
}

fn draw_tooltip(f: &mut Frame, area: Rect, state: &TuiState) {
    let lines = match &state.tooltip {
        Tooltip::Visible(content) => vec![
            Line::from(vec![
                Span::styled("commit ", Style::default().fg(Color::Gray)),
                Span::styled(
                    content.id.clone(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(content.date.clone()),
            Line::from(content.time.clone()),
            Line::from(content.author.clone()),
            Line::from(format!("{} lines", content.total_lines)),
            Line::from(match &content.url {
                Some(url) => Span::styled(url.clone(), Style::default().fg(Color::Blue)),
                None => Span::styled("no link", Style::default().fg(Color::DarkGray)),
            }),
        ],
        Tooltip::Hidden => vec![Line::from(Span::styled(
            "Hover a dot for details",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Commit").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
