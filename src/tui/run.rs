use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::commits::process_commits;
use crate::summary::LanguagePalette;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{TuiState, ViewMode};
use super::views::{
    draw_files_view, draw_help_overlay, draw_plot_view, draw_stats_view, draw_story_view,
};

pub fn run(common: &CommonArgs) -> io::Result<()> {
    // The data load completes before any terminal state changes; a failure
    // here reports normally instead of garbling a raw-mode screen.
    let records = crate::loader::load(&common.log)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let commits = process_commits(&records, common.repo_url.as_deref());
    let palette = LanguagePalette::assign(&records);

    let cutoff = common
        .resolve_cutoff()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut state = TuiState::new(commits, palette);
    if let Some(cutoff) = cutoff {
        state.set_cutoff(cutoff);
    }

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    loop {
        state.scene.tick();

        let draw_result = terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(size);

            let tabs = Tabs::new(vec!["Plot", "Stats", "Files", "Story"])
                .block(Block::default().borders(Borders::ALL).title("View Mode"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            state.view_mode = match state.tab_index {
                0 => ViewMode::Plot,
                1 => ViewMode::Stats,
                2 => ViewMode::Files,
                3 => ViewMode::Story,
                _ => ViewMode::Plot,
            };

            match state.view_mode {
                ViewMode::Plot => draw_plot_view(f, chunks[1], &mut state),
                ViewMode::Stats => draw_stats_view(f, chunks[1], &state),
                ViewMode::Files => draw_files_view(f, chunks[1], &state),
                ViewMode::Story => draw_story_view(f, chunks[1], &state),
            }

            let footer = match &state.status_message {
                Some((message, at)) if at.elapsed() < Duration::from_secs(2) => {
                    Paragraph::new(message.clone()).style(Style::default().fg(Color::Green))
                }
                _ => Paragraph::new("q quit · h help · Tab views · drag to brush")
                    .style(Style::default().fg(Color::DarkGray)),
            };
            f.render_widget(footer, chunks[2]);
        });

        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {e}");
        }

        if poll(Duration::from_millis(100))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut state)? {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(mouse_event, &mut state)?;
                }
                _ => {}
            }
        }
    }

    terminal.clear()?;
    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}
