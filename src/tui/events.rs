use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::input::{copy_commit_id, copy_commit_url};
use super::layout::mouse_to_px;
use super::state::{TuiState, ViewMode};

/// Handle a keyboard event, mutating session state and returning `true` if
/// the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut TuiState) -> io::Result<bool> {
    if key_event.kind != KeyEventKind::Press {
        return Ok(false);
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        }
        return Ok(false);
    }

    match key_event.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Tab => {
            state.tab_index = (state.tab_index + 1) % 4;
        }
        KeyCode::BackTab => {
            state.tab_index = if state.tab_index == 0 {
                3
            } else {
                state.tab_index - 1
            };
        }
        KeyCode::Esc => state.clear_brush(),
        KeyCode::Char('r') => state.reset_cutoff(),
        KeyCode::Char('c') => copy_commit_id(state),
        KeyCode::Char('y') => copy_commit_url(state),
        KeyCode::Left => state.nudge_slider(-2.0),
        KeyCode::Right => state.nudge_slider(2.0),
        KeyCode::Home => state.set_cutoff_percent(0.0),
        KeyCode::End => state.set_cutoff_percent(100.0),
        KeyCode::Up | KeyCode::Char('k') => match state.view_mode {
            ViewMode::Story => {
                let index = state.story_index.saturating_sub(1);
                state.focus_story(index);
            }
            ViewMode::Files => state.files_scroll = state.files_scroll.saturating_sub(1),
            _ => {}
        },
        KeyCode::Down | KeyCode::Char('j') => match state.view_mode {
            ViewMode::Story => state.focus_story(state.story_index + 1),
            ViewMode::Files => state.files_scroll += 1,
            _ => {}
        },
        KeyCode::Char('g') => {
            if state.view_mode == ViewMode::Story {
                state.focus_story(0);
            }
        }
        KeyCode::Char('G') => {
            if state.view_mode == ViewMode::Story {
                state.focus_story(state.commits.len().saturating_sub(1));
            }
        }
        _ => {}
    }

    Ok(false)
}

/// Handle pointer interactions: brush phases and hover on the chart, wheel
/// scrolling in the narrative and file listing.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut TuiState) -> io::Result<()> {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if state.view_mode == ViewMode::Plot {
                if let Some((x, y)) =
                    mouse_to_px(state.chart_area, mouse_event.column, mouse_event.row)
                {
                    state.brush_start(x, y);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.view_mode == ViewMode::Plot && state.selection.is_some() {
                if let Some((x, y)) =
                    mouse_to_px(state.chart_area, mouse_event.column, mouse_event.row)
                {
                    state.brush_drag(x, y);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.view_mode == ViewMode::Plot && state.selection.is_some() {
                if let Some((x, y)) =
                    mouse_to_px(state.chart_area, mouse_event.column, mouse_event.row)
                {
                    state.brush_end(x, y);
                }
            }
        }
        MouseEventKind::Moved => {
            if state.view_mode == ViewMode::Plot {
                match mouse_to_px(state.chart_area, mouse_event.column, mouse_event.row) {
                    Some((x, y)) => state.hover(x, y),
                    None => state.tooltip = crate::scatter::Tooltip::Hidden,
                }
            }
        }
        MouseEventKind::ScrollUp => match state.view_mode {
            ViewMode::Story => {
                let index = state.story_index.saturating_sub(1);
                state.focus_story(index);
            }
            ViewMode::Files => state.files_scroll = state.files_scroll.saturating_sub(1),
            ViewMode::Plot => state.nudge_slider(-2.0),
            _ => {}
        },
        MouseEventKind::ScrollDown => match state.view_mode {
            ViewMode::Story => state.focus_story(state.story_index + 1),
            ViewMode::Files => state.files_scroll += 1,
            ViewMode::Plot => state.nudge_slider(2.0),
            _ => {}
        },
        _ => {}
    }
    Ok(())
}
