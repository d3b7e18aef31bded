//! Core data types shared between the controller, the backend and the UI.
//!
//! Rule of thumb:
//! - "boring bags of data"
//! - no GUI code, no rodio code

use std::path::PathBuf;

use super::error::{PlaybackError, Result};

/// Backend-neutral playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Volume percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    pub const MUTE: Self = Self(0);
    pub const DEFAULT: Self = Self(50);

    pub fn new(percent: u32) -> Result<Self> {
        if percent > 100 {
            return Err(PlaybackError::InvalidArgument(percent));
        }
        Ok(Self(percent as u8))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_mute(self) -> bool {
        self.0 == 0
    }

    /// Linear gain for the audio sink (0.0..=1.0).
    pub fn gain(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for VolumeLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Icon on the play/pause button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayGlyph {
    Play,
    Pause,
}

impl PlayGlyph {
    pub fn for_state(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Playing => Self::Pause,
            PlaybackState::Paused | PlaybackState::Stopped => Self::Play,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Play => "▶",
            Self::Pause => "⏸",
        }
    }
}

/// Icon on the volume (mute) button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeGlyph {
    Mute,
    Low,
    High,
}

impl VolumeGlyph {
    /// Step function: 0 -> Mute, 1..=50 -> Low, 51..=100 -> High
    pub fn for_level(level: VolumeLevel) -> Self {
        match level.percent() {
            0 => Self::Mute,
            1..=50 => Self::Low,
            _ => Self::High,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mute => "🔇",
            Self::Low => "🔉",
            Self::High => "🔊",
        }
    }
}

/// What a finished or failed track should do to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndOfMediaPolicy {
    /// Go back to Stopped and keep the window open.
    #[default]
    Stop,
    /// Single-track mode: exit once playback ends or fails.
    Quit,
}

/// Returned by callbacks that may end the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Metadata for the loaded file. Anything but the path may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub path: PathBuf,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration_ms: Option<u64>,
}

impl TrackInfo {
    pub fn from_path(path: PathBuf) -> Self {
        Self {
            path,
            title: None,
            artist: None,
            duration_ms: None,
        }
    }
}

/// Playback position for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
}

impl Progress {
    /// 0.0..=1.0, or 0.0 while the duration is unknown.
    pub fn ratio(&self) -> f32 {
        match self.duration_ms {
            Some(dur) if dur > 0 => (self.position_ms.min(dur) as f64 / dur as f64) as f32,
            _ => 0.0,
        }
    }
}
