use crate::scatter::Tooltip;

use super::state::TuiState;

pub fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Copy the hovered commit's id, surfacing clipboard errors in status.
pub fn copy_commit_id(state: &mut TuiState) {
    if let Tooltip::Visible(content) = &state.tooltip {
        let id = content.id.clone();
        match copy_to_clipboard(&id) {
            Ok(_) => state.set_status(format!("Copied: {id}")),
            Err(err) => state.set_status(format!("Clipboard error: {err}")),
        }
    }
}

/// Copy the hovered commit's link, when one was derived.
pub fn copy_commit_url(state: &mut TuiState) {
    if let Tooltip::Visible(content) = &state.tooltip {
        match content.url.clone() {
            Some(url) => match copy_to_clipboard(&url) {
                Ok(_) => state.set_status(format!("Copied: {url}")),
                Err(err) => state.set_status(format!("Clipboard error: {err}")),
            },
            None => state.set_status("No repository URL configured".to_string()),
        }
    }
}
