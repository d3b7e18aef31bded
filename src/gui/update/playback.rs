//! gui/update/playback.rs
//! GUI -> controller bridge.
//!
//! - GUI never touches rodio directly.
//! - Backend events arrive through TickPlayback polling.

use iced::Task;
use tracing::info;

use super::super::state::{Message, Wave};
use crate::core::types::{Flow, PlaybackState};

pub(crate) fn drain_events(state: &mut Wave) -> Task<Message> {
    let had_error = state.controller.last_error().cloned();

    if state.controller.pump() == Flow::Quit {
        info!("quitting after end of media");
        return iced::exit();
    }

    // Only rewrite the status line when something new went wrong.
    if let Some(e) = state.controller.last_error() {
        if Some(e) != had_error.as_ref() {
            state.status = e.to_string();
        }
    }

    Task::none()
}

pub(crate) fn toggle_play_pause(state: &mut Wave) -> Task<Message> {
    info!("clicked play/pause");
    state.controller.toggle_play_pause();

    let ok_text = match state.controller.state() {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };
    state.refresh_status(ok_text);

    Task::none()
}

pub(crate) fn stop(state: &mut Wave) -> Task<Message> {
    info!("clicked stop");
    state.controller.stop();
    state.refresh_status("Stopped");
    Task::none()
}

// No playlist: prev/next only acknowledge the click.

pub(crate) fn prev(state: &mut Wave) -> Task<Message> {
    info!("previous button clicked");
    state.status = "No previous track.".into();
    Task::none()
}

pub(crate) fn next(state: &mut Wave) -> Task<Message> {
    info!("next button clicked");
    state.status = "No next track.".into();
    Task::none()
}

pub(crate) fn set_volume(state: &mut Wave, volume: u8) -> Task<Message> {
    state.controller.set_volume(u32::from(volume));
    state.refresh_status(&format!("Volume {}", state.controller.volume()));
    Task::none()
}

pub(crate) fn toggle_mute(state: &mut Wave) -> Task<Message> {
    state.controller.toggle_mute();

    let ok_text = if state.controller.is_muted() {
        format!("Muted (was {})", state.controller.saved_volume())
    } else {
        format!("Volume {}", state.controller.volume())
    };
    state.refresh_status(&ok_text);

    Task::none()
}
