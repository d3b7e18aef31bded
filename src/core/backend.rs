//! core/backend.rs
//! The seam between the controller and whatever actually makes sound.
//!
//! Implementations must answer `state()`/`volume()` synchronously. Anything
//! that happens later (track ended, decode error, position ticks) is queued
//! and handed over through `drain_events()` on the controller's thread.

use std::path::Path;

use super::error::Result;
use super::types::{PlaybackState, TrackInfo, VolumeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Loaded,
    EndOfMedia,
    Invalid,
}

/// Asynchronous notifications from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    StatusChanged(MediaStatus),
    Error(String),
    MediaLoaded(TrackInfo),
    PositionChanged(u64),
}

pub trait PlaybackBackend {
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Fails with `NoMediaLoaded` when nothing is loaded.
    fn play(&mut self) -> Result<()>;

    /// Fails with `InvalidState` unless currently playing.
    fn pause(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    fn set_volume(&mut self, level: VolumeLevel) -> Result<()>;

    fn volume(&self) -> VolumeLevel;

    fn state(&self) -> PlaybackState;

    fn drain_events(&mut self) -> Vec<BackendEvent>;
}
