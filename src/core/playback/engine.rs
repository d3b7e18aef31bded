//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per loaded track, created paused)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, info, warn};

use super::probe::probe_track;
use super::{PlayerCommand, PlayerEvent};
use crate::core::types::TrackInfo;

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    playing: bool,
    volume: f32,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>) -> Result<Self, String> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to open default audio output: {e}"))?;
        stream.log_on_drop(false);

        info!("audio output opened");

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            playing: false,
            volume: 0.5,
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.release_sink();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.release_sink();
        debug!("engine loop exited");
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Returns true when the loop should exit.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        debug!(?cmd, "engine command");

        match cmd {
            PlayerCommand::Load(path) => match self.open(&path) {
                Ok(info) => {
                    self.current_path = Some(path);
                    self.emit(PlayerEvent::Loaded(info));
                }
                Err(e) => {
                    self.current_path = None;
                    self.emit(PlayerEvent::LoadFailed(e));
                }
            },
            PlayerCommand::Play => {
                // After Stop / end-of-track the sink is gone: reopen the same file.
                if self.sink.is_none() {
                    if let Some(path) = self.current_path.clone() {
                        if let Err(e) = self.open(&path) {
                            self.current_path = None;
                            self.emit(PlayerEvent::LoadFailed(e));
                            return false;
                        }
                    }
                }

                if let Some(sink) = &self.sink {
                    sink.play();
                    self.playing = true;
                    self.emit(PlayerEvent::Playing);
                } else {
                    self.emit(PlayerEvent::Error("Nothing to play".into()));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.playing = false;
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Stop => {
                self.release_sink();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        let position_ms = sink.get_pos().as_millis() as u64;
        self.emit(PlayerEvent::Position { position_ms });

        if self.playing && sink.empty() {
            info!("track drained");
            self.emit(PlayerEvent::TrackEnded);
            self.release_sink();
        }
    }

    /// Replace the sink with a paused one holding `path`.
    fn open(&mut self, path: &Path) -> Result<TrackInfo, String> {
        self.release_sink();

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);

        let file = File::open(path).map_err(|e| format!("Failed to open file: {e}"))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| format!("Decode failed: {e}"))?;
        let rodio_duration_ms = decoder.total_duration().map(|d| d.as_millis() as u64);

        sink.append(decoder);
        self.sink = Some(sink);

        let mut info = probe_track(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "probe failed, showing file name only");
            TrackInfo::from_path(path.to_path_buf())
        });
        if rodio_duration_ms.is_some() {
            info.duration_ms = rodio_duration_ms;
        }

        Ok(info)
    }

    fn release_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
    }
}
