//! GUI state + messages.
//! Pure data definitions used by update + view.

use crate::config::Config;
use crate::core::PlaybackController;
use crate::core::playback::RodioBackend;

/// App state
pub(crate) struct Wave {
    pub controller: PlaybackController<RodioBackend>,

    // "File > Open" stand-in
    pub path_input: String,

    pub status: String,
}

impl Wave {
    pub(crate) fn new(config: &Config) -> Self {
        let controller =
            PlaybackController::new(RodioBackend::start(), config.volume, config.end_of_media);

        let mut state = Self {
            controller,
            path_input: String::new(),
            status: "Open an audio file to start.".to_string(),
        };

        if let Some(path) = &config.initial_file {
            state.path_input = path.display().to_string();
            state.controller.load(path);
            state.refresh_status("Loaded");
        }

        state
    }

    /// Status line: the controller's last refusal wins over `ok_text`.
    pub(crate) fn refresh_status(&mut self, ok_text: &str) {
        self.status = match self.controller.last_error() {
            Some(e) => e.to_string(),
            None => ok_text.to_string(),
        };
    }
}

/// Message = "something happened".
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Open
    PathInputChanged(String),
    OpenPressed,

    // Transport
    TogglePlayPause,
    Stop,
    Prev,
    Next,

    // Volume
    VolumeChanged(u8),
    ToggleMute,

    // Poll backend events
    TickPlayback,
}
