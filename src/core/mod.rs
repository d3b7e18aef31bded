//! core/mod.rs
//!
//! Everything that is not pixels:
//! - `PlaybackController`: UI events in, backend calls out, glyph/slider state kept honest
//! - `PlaybackBackend`: the seam the controller talks through
//! - `playback`: the rodio engine thread implementing that seam
//!
//! No Iced imports below this line. The GUI only reads accessors and calls
//! controller operations.

pub mod backend;
pub mod controller;
pub mod error;
pub mod playback;
pub mod types;

pub use controller::PlaybackController;
