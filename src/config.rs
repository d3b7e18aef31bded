//! Command line -> `Config`.
//! Nothing is read from or written to disk here; settings live for one run.

use std::path::PathBuf;

use clap::Parser;

use crate::core::types::{EndOfMediaPolicy, VolumeLevel};

#[derive(Debug, Parser)]
#[command(name = "wave", version, about = "Wave Media Player")]
pub struct Cli {
    /// Audio file to load at startup
    pub file: Option<PathBuf>,

    /// Initial volume in percent
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    /// Where to write the log (in addition to stderr)
    #[arg(long, default_value = "wave_media_player.log")]
    pub log_file: PathBuf,

    /// Exit once the track finishes or fails instead of stopping
    #[arg(long)]
    pub quit_on_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub initial_file: Option<PathBuf>,
    pub volume: VolumeLevel,
    pub log_file: PathBuf,
    pub end_of_media: EndOfMediaPolicy,
}

impl TryFrom<Cli> for Config {
    type Error = crate::core::error::PlaybackError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        Ok(Self {
            initial_file: cli.file,
            volume: VolumeLevel::new(u32::from(cli.volume))?,
            log_file: cli.log_file,
            end_of_media: if cli.quit_on_end {
                EndOfMediaPolicy::Quit
            } else {
                EndOfMediaPolicy::Stop
            },
        })
    }
}
