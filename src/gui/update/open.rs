//! gui/update/open.rs
//! Loading a file from the path box.

use std::path::PathBuf;

use iced::Task;
use tracing::info;

use super::super::state::{Message, Wave};

pub(crate) fn path_input_changed(state: &mut Wave, s: String) -> Task<Message> {
    state.path_input = s;
    Task::none()
}

pub(crate) fn open_pressed(state: &mut Wave) -> Task<Message> {
    let input = state.path_input.trim();
    if input.is_empty() {
        state.status = "Type a file path first.".into();
        return Task::none();
    }

    let path = PathBuf::from(input);
    info!(path = %path.display(), "selected file");

    state.controller.load(&path);
    state.refresh_status(&format!("Loaded: {}", path.display()));

    Task::none()
}
