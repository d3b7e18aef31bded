//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Wave};

mod open;
mod playback;

pub(crate) fn update(state: &mut Wave, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Open
        Message::PathInputChanged(s) => open::path_input_changed(state, s),
        Message::OpenPressed => open::open_pressed(state),

        // Transport
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::Prev => playback::prev(state),
        Message::Next => playback::next(state),

        // Volume
        Message::VolumeChanged(v) => playback::set_volume(state, v),
        Message::ToggleMute => playback::toggle_mute(state),
    }
}
