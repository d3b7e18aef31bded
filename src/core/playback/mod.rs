//! core/playback/mod.rs
//! Rodio-backed playback: an engine thread plus the channel plumbing to it.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::error;

use crate::core::error::{PlaybackError, Result};
use crate::core::types::TrackInfo;

mod engine;
mod probe;
mod rodio_backend;

use engine::PlaybackEngine;
pub use rodio_backend::RodioBackend;

/// Sending half of the engine's command channel.
pub struct EngineHandle {
    command_tx: Sender<PlayerCommand>,
}

impl EngineHandle {
    /// Fails if the engine thread is gone.
    pub fn send(&self, cmd: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|_| PlaybackError::Backend("playback engine is not running".into()))
    }
}

#[derive(Debug)]
pub enum PlayerCommand {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Loaded(TrackInfo),
    Playing,
    Paused,
    Stopped,
    Position { position_ms: u64 },
    TrackEnded,
    /// Open or reopen of the current file failed.
    LoadFailed(String),
    Error(String),
}

/// Spawns the engine thread and returns both channel ends the GUI side needs.
pub fn start_playback() -> (EngineHandle, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    let spawned = thread::Builder::new()
        .name("wave-playback".into())
        .spawn(move || {
            let mut engine = match PlaybackEngine::new(event_tx.clone()) {
                Ok(e) => e,
                Err(msg) => {
                    error!(%msg, "playback engine failed to start");
                    let _ = event_tx.send(PlayerEvent::Error(msg));
                    return;
                }
            };

            engine.run(command_rx);
        });

    if let Err(e) = spawned {
        // The receiver half was moved into the closure and dropped with it,
        // so every later send reports the engine as not running.
        error!(error = %e, "could not spawn playback thread");
    }

    (EngineHandle { command_tx }, event_rx)
}
