//! core/playback/rodio_backend.rs
//! `PlaybackBackend` on top of the engine thread.
//!
//! Commands are fire-and-forget, so this side keeps a mirror of what the
//! engine was told. Refusals (nothing loaded, not playing) are decided here
//! and never reach the engine.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use tracing::debug;

use super::{EngineHandle, PlayerCommand, PlayerEvent, start_playback};
use crate::core::backend::{BackendEvent, MediaStatus, PlaybackBackend};
use crate::core::error::{PlaybackError, Result};
use crate::core::types::{PlaybackState, VolumeLevel};

pub struct RodioBackend {
    engine: EngineHandle,
    events: Receiver<PlayerEvent>,

    media: Option<PathBuf>,
    state: PlaybackState,
    volume: VolumeLevel,
}

impl RodioBackend {
    /// Spawn the engine thread and wrap it.
    pub fn start() -> Self {
        let (engine, events) = start_playback();
        Self::from_parts(engine, events)
    }

    pub(crate) fn from_parts(engine: EngineHandle, events: Receiver<PlayerEvent>) -> Self {
        Self {
            engine,
            events,
            media: None,
            state: PlaybackState::Stopped,
            volume: VolumeLevel::DEFAULT,
        }
    }

    fn translate(&mut self, event: PlayerEvent, out: &mut Vec<BackendEvent>) {
        match event {
            PlayerEvent::Loaded(info) => {
                self.media = Some(info.path.clone());
                out.push(BackendEvent::StatusChanged(MediaStatus::Loaded));
                out.push(BackendEvent::MediaLoaded(info));
            }
            PlayerEvent::Position { position_ms } => {
                out.push(BackendEvent::PositionChanged(position_ms));
            }
            PlayerEvent::TrackEnded => {
                self.state = PlaybackState::Stopped;
                out.push(BackendEvent::StatusChanged(MediaStatus::EndOfMedia));
            }
            PlayerEvent::LoadFailed(message) => {
                self.media = None;
                self.state = PlaybackState::Stopped;
                out.push(BackendEvent::StatusChanged(MediaStatus::Invalid));
                out.push(BackendEvent::Error(message));
            }
            PlayerEvent::Error(message) => {
                self.state = PlaybackState::Stopped;
                out.push(BackendEvent::Error(message));
            }
            // Confirmations of commands the mirror already applied.
            PlayerEvent::Playing | PlayerEvent::Paused | PlayerEvent::Stopped => {
                debug!(?event, "engine confirmed");
            }
        }
    }
}

impl PlaybackBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(PlaybackError::Backend(format!(
                "not a readable file: {}",
                path.display()
            )));
        }

        self.engine.send(PlayerCommand::Load(path.to_path_buf()))?;
        self.media = Some(path.to_path_buf());
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.media.is_none() {
            return Err(PlaybackError::NoMediaLoaded);
        }

        self.engine.send(PlayerCommand::Play)?;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.state != PlaybackState::Playing {
            return Err(PlaybackError::InvalidState(format!(
                "cannot pause while {:?}",
                self.state
            )));
        }

        self.engine.send(PlayerCommand::Pause)?;
        self.state = PlaybackState::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // A dead engine is already silent.
        let _ = self.engine.send(PlayerCommand::Stop);
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    fn set_volume(&mut self, level: VolumeLevel) -> Result<()> {
        self.engine.send(PlayerCommand::SetVolume(level.gain()))?;
        self.volume = level;
        Ok(())
    }

    fn volume(&self) -> VolumeLevel {
        self.volume
    }

    fn state(&self) -> PlaybackState {
        self.state
    }

    fn drain_events(&mut self) -> Vec<BackendEvent> {
        let mut drained: Vec<PlayerEvent> = Vec::new();
        while let Ok(ev) = self.events.try_recv() {
            drained.push(ev);
        }

        let mut out = Vec::with_capacity(drained.len());
        for ev in drained {
            self.translate(ev, &mut out);
        }
        out
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.engine.send(PlayerCommand::Shutdown);
    }
}
