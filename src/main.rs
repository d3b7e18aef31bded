//! Wave Media Player
//!
//! A small desktop audio player (built with `iced`): one window, one track,
//! transport controls and a volume slider with mute.
//!
//! # How the pieces fit
//! - `gui::Wave` = the app's memory; `update` reacts to messages, `view` draws it
//! - `core::PlaybackController` = the only thing that talks to the backend and
//!   decides what the play/volume buttons show
//! - `core::playback` = rodio engine on its own thread, reached through channels
//!
//! **Message happens -> update asks the controller -> view redraws**
//!
//! # Threads
//! - GUI thread: every controller call happens here.
//! - Engine thread: owns the audio device; its events are polled every 200 ms
//!   (`Message::TickPlayback`) and folded back in on the GUI thread.

mod config;
mod core;
mod gui;
mod logging;

use clap::Parser;
use tracing::info;

use crate::config::{Cli, Config};
use crate::gui::view::constants::{WINDOW_H, WINDOW_W};

fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Cli::parse())?;

    // Once, before anything else logs.
    logging::init(&config.log_file)?;
    info!(?config, "starting Wave");

    iced::application(move || gui::Wave::new(&config), gui::update, gui::view)
        .title("Wave Media Player")
        .subscription(gui::subscription)
        .window_size((WINDOW_W, WINDOW_H))
        .run()?;

    info!("window closed");
    Ok(())
}
