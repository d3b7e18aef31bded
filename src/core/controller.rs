//! core/controller.rs
//! Keeps the transport glyphs and the volume slider in step with the backend.
//!
//! Every UI event goes through here:
//! - ask the backend to do the thing
//! - only touch the cached state/glyphs once the backend said yes
//! - on refusal: log, remember the error, leave the UI alone
//!
//! Mute is derived from the volume (muted <=> volume == 0). The pre-mute level
//! lives in `saved_volume` and is only written right before muting.

use std::path::Path;

use tracing::{debug, error, info, warn};

use super::backend::{BackendEvent, MediaStatus, PlaybackBackend};
use super::error::PlaybackError;
use super::types::{
    EndOfMediaPolicy, Flow, PlayGlyph, PlaybackState, Progress, TrackInfo, VolumeGlyph,
    VolumeLevel,
};

pub struct PlaybackController<B: PlaybackBackend> {
    backend: B,

    // Cached, mirrors backend
    state: PlaybackState,
    play_glyph: PlayGlyph,

    current_volume: VolumeLevel,
    saved_volume: VolumeLevel,
    volume_glyph: VolumeGlyph,

    policy: EndOfMediaPolicy,

    track: Option<TrackInfo>,
    progress: Progress,
    last_error: Option<PlaybackError>,
}

impl<B: PlaybackBackend> PlaybackController<B> {
    pub fn new(backend: B, initial_volume: VolumeLevel, policy: EndOfMediaPolicy) -> Self {
        let current_volume = backend.volume();
        let mut controller = Self {
            state: backend.state(),
            play_glyph: PlayGlyph::for_state(backend.state()),
            current_volume,
            saved_volume: VolumeLevel::DEFAULT,
            volume_glyph: VolumeGlyph::for_level(current_volume),
            backend,
            policy,
            track: None,
            progress: Progress::default(),
            last_error: None,
        };

        if controller.apply_volume(initial_volume) && !initial_volume.is_mute() {
            controller.saved_volume = initial_volume;
        }

        info!(volume = %controller.current_volume, ?policy, "playback controller ready");
        controller
    }

    // Accessors (view layer)

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn play_glyph(&self) -> PlayGlyph {
        self.play_glyph
    }

    pub fn volume_glyph(&self) -> VolumeGlyph {
        self.volume_glyph
    }

    pub fn volume(&self) -> VolumeLevel {
        self.current_volume
    }

    pub fn saved_volume(&self) -> VolumeLevel {
        self.saved_volume
    }

    /// Where the volume slider should sit.
    pub fn slider_value(&self) -> u8 {
        self.current_volume.percent()
    }

    pub fn is_muted(&self) -> bool {
        self.current_volume.is_mute()
    }

    pub fn track(&self) -> Option<&TrackInfo> {
        self.track.as_ref()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn last_error(&self) -> Option<&PlaybackError> {
        self.last_error.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // Operations

    pub fn load(&mut self, path: &Path) {
        match self.backend.load(path) {
            Ok(()) => {
                info!(path = %path.display(), "media loaded");
                self.set_state(PlaybackState::Stopped);
                self.track = Some(TrackInfo::from_path(path.to_path_buf()));
                self.progress = Progress::default();
                self.last_error = None;
            }
            Err(e) => self.refuse("load", e),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let observed = self.backend.state();
        debug!(?observed, "toggle play/pause");

        let result = match observed {
            PlaybackState::Playing => self.backend.pause().map(|()| PlaybackState::Paused),
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.backend.play().map(|()| PlaybackState::Playing)
            }
        };

        match result {
            Ok(next) => {
                info!(from = ?observed, to = ?next, "transport");
                self.set_state(next);
                self.last_error = None;
            }
            Err(e) => self.refuse("toggle play/pause", e),
        }
    }

    pub fn stop(&mut self) {
        match self.backend.stop() {
            Ok(()) => {
                info!("stopped");
                self.set_state(PlaybackState::Stopped);
                self.progress.position_ms = 0;
                self.last_error = None;
            }
            Err(e) => self.refuse("stop", e),
        }
    }

    /// Set the volume from a raw percentage (slider value).
    pub fn set_volume(&mut self, percent: u32) {
        match VolumeLevel::new(percent) {
            Ok(level) => {
                self.apply_volume(level);
            }
            Err(e) => self.refuse("set volume", e),
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.current_volume.is_mute() {
            let restore = self.saved_volume;
            if self.apply_volume(restore) {
                info!(volume = %restore, "volume restored");
            }
        } else {
            self.saved_volume = self.current_volume;
            if self.apply_volume(VolumeLevel::MUTE) {
                info!(saved = %self.saved_volume, "muted");
            }
        }
    }

    pub fn on_media_ended(&mut self) -> Flow {
        info!("media playback finished");
        self.reset_to_stopped();
        self.flow()
    }

    pub fn on_media_error(&mut self, message: &str) -> Flow {
        error!(%message, "media error");
        self.reset_to_stopped();
        self.last_error = Some(PlaybackError::Backend(message.to_string()));
        self.flow()
    }

    /// Drain backend notifications and fold them into the cached state.
    pub fn pump(&mut self) -> Flow {
        let mut flow = Flow::Continue;

        for event in self.backend.drain_events() {
            if self.handle_event(event) == Flow::Quit {
                flow = Flow::Quit;
            }
        }

        flow
    }

    fn handle_event(&mut self, event: BackendEvent) -> Flow {
        match event {
            BackendEvent::StatusChanged(MediaStatus::EndOfMedia) => return self.on_media_ended(),
            // The loaded file is unusable; the matching Error event follows.
            BackendEvent::StatusChanged(MediaStatus::Invalid) => {
                debug!("media invalid, dropping track");
                self.reset_to_stopped();
                self.track = None;
                self.progress = Progress::default();
            }
            BackendEvent::StatusChanged(status) => debug!(?status, "media status changed"),
            BackendEvent::Error(message) => return self.on_media_error(&message),
            BackendEvent::MediaLoaded(info) => {
                debug!(path = %info.path.display(), duration_ms = ?info.duration_ms, "track info");
                self.progress.duration_ms = info.duration_ms;
                self.track = Some(info);
            }
            // Ticks queued before a stop/load land after it; a stopped engine has no position.
            BackendEvent::PositionChanged(_) if self.state == PlaybackState::Stopped => {}
            BackendEvent::PositionChanged(ms) => self.progress.position_ms = ms,
        }

        Flow::Continue
    }

    /// The only place the volume glyph is computed. Returns true on success.
    fn apply_volume(&mut self, level: VolumeLevel) -> bool {
        match self.backend.set_volume(level) {
            Ok(()) => {
                self.current_volume = level;
                self.volume_glyph = VolumeGlyph::for_level(level);
                self.last_error = None;
                debug!(volume = %level, glyph = ?self.volume_glyph, "volume set");
                true
            }
            Err(e) => {
                self.refuse("set volume", e);
                false
            }
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        self.play_glyph = PlayGlyph::for_state(state);
    }

    fn reset_to_stopped(&mut self) {
        self.set_state(PlaybackState::Stopped);
        self.progress.position_ms = 0;
    }

    fn flow(&self) -> Flow {
        match self.policy {
            EndOfMediaPolicy::Stop => Flow::Continue,
            EndOfMediaPolicy::Quit => Flow::Quit,
        }
    }

    fn refuse(&mut self, op: &str, e: PlaybackError) {
        match &e {
            PlaybackError::Backend(_) => error!(op, error = %e, "backend refused"),
            _ => warn!(op, error = %e, "request refused"),
        }
        self.last_error = Some(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use proptest::prelude::*;
    use std::path::PathBuf;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn init_logging() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(tracing::Level::DEBUG)
                .try_init();
        });
    }

    /// Scripted backend: obeys the contract, can be told to refuse.
    #[derive(Debug, Default)]
    pub(crate) struct FakeBackend {
        pub media: Option<PathBuf>,
        pub state: PlaybackState,
        pub volume: Option<VolumeLevel>,
        pub broken: bool,
        pub volume_calls: usize,
        pub queued: Vec<BackendEvent>,
    }

    impl FakeBackend {
        fn loaded() -> Self {
            Self {
                media: Some(PathBuf::from("song.mp3")),
                ..Self::default()
            }
        }

        fn check(&self) -> Result<()> {
            if self.broken {
                return Err(PlaybackError::Backend("device gone".into()));
            }
            Ok(())
        }
    }

    impl PlaybackBackend for FakeBackend {
        fn load(&mut self, path: &Path) -> Result<()> {
            self.check()?;
            self.media = Some(path.to_path_buf());
            self.state = PlaybackState::Stopped;
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.check()?;
            if self.media.is_none() {
                return Err(PlaybackError::NoMediaLoaded);
            }
            self.state = PlaybackState::Playing;
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.check()?;
            if self.state != PlaybackState::Playing {
                return Err(PlaybackError::InvalidState("not playing".into()));
            }
            self.state = PlaybackState::Paused;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.state = PlaybackState::Stopped;
            Ok(())
        }

        fn set_volume(&mut self, level: VolumeLevel) -> Result<()> {
            self.volume_calls += 1;
            self.check()?;
            self.volume = Some(level);
            Ok(())
        }

        fn volume(&self) -> VolumeLevel {
            self.volume.unwrap_or(VolumeLevel::DEFAULT)
        }

        fn state(&self) -> PlaybackState {
            self.state
        }

        fn drain_events(&mut self) -> Vec<BackendEvent> {
            std::mem::take(&mut self.queued)
        }
    }

    fn controller(backend: FakeBackend) -> PlaybackController<FakeBackend> {
        init_logging();
        PlaybackController::new(backend, VolumeLevel::DEFAULT, EndOfMediaPolicy::Stop)
    }

    #[test]
    fn starts_stopped_at_half_volume() {
        let c = controller(FakeBackend::default());
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.play_glyph(), PlayGlyph::Play);
        assert_eq!(c.slider_value(), 50);
        assert_eq!(c.volume_glyph(), VolumeGlyph::Low);
        assert_eq!(c.backend().volume(), VolumeLevel::DEFAULT);
    }

    #[test]
    fn play_then_pause_then_resume() {
        let mut c = controller(FakeBackend::loaded());

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.play_glyph(), PlayGlyph::Pause);

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.play_glyph(), PlayGlyph::Play);

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert!(c.last_error().is_none());
    }

    #[test]
    fn play_without_media_is_refused() {
        let mut c = controller(FakeBackend::default());

        for _ in 0..3 {
            c.toggle_play_pause();
            assert_eq!(c.state(), PlaybackState::Stopped);
            assert_eq!(c.play_glyph(), PlayGlyph::Play);
        }
        assert_eq!(c.last_error(), Some(&PlaybackError::NoMediaLoaded));
    }

    #[test]
    fn broken_backend_never_changes_cached_state() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);

        c.backend_mut().broken = true;
        for _ in 0..4 {
            c.toggle_play_pause();
            assert_eq!(c.state(), PlaybackState::Playing);
            assert_eq!(c.play_glyph(), PlayGlyph::Pause);
        }
        assert!(matches!(c.last_error(), Some(PlaybackError::Backend(_))));
    }

    #[test]
    fn out_of_range_volume_never_reaches_backend() {
        let mut c = controller(FakeBackend::default());
        let calls = c.backend().volume_calls;

        c.set_volume(101);

        assert_eq!(c.backend().volume_calls, calls);
        assert_eq!(c.slider_value(), 50);
        assert_eq!(c.last_error(), Some(&PlaybackError::InvalidArgument(101)));
    }

    #[test]
    fn failed_volume_keeps_glyph_and_slider() {
        let mut c = controller(FakeBackend::default());
        c.set_volume(80);
        c.backend_mut().broken = true;

        c.set_volume(10);
        assert_eq!(c.slider_value(), 80);
        assert_eq!(c.volume_glyph(), VolumeGlyph::High);

        c.toggle_mute();
        assert_eq!(c.slider_value(), 80);
        assert!(!c.is_muted());
    }

    #[test]
    fn mute_saves_and_restores() {
        let mut c = controller(FakeBackend::default());
        c.set_volume(73);

        c.toggle_mute();
        assert!(c.is_muted());
        assert_eq!(c.slider_value(), 0);
        assert_eq!(c.saved_volume().percent(), 73);
        assert_eq!(c.volume_glyph(), VolumeGlyph::Mute);

        c.toggle_mute();
        assert_eq!(c.slider_value(), 73);
        assert_eq!(c.volume_glyph(), VolumeGlyph::High);
    }

    #[test]
    fn slider_at_zero_unmutes_to_saved_level() {
        let mut c = controller(FakeBackend::default());
        c.set_volume(0);
        assert!(c.is_muted());

        c.toggle_mute();
        assert_eq!(c.slider_value(), 50);
        assert_eq!(c.saved_volume().percent(), 50);
    }

    #[test]
    fn transport_and_volume_scenario() {
        let mut c = controller(FakeBackend::loaded());

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.play_glyph(), PlayGlyph::Pause);

        c.set_volume(0);
        assert_eq!(c.volume_glyph(), VolumeGlyph::Mute);
        assert_eq!(c.slider_value(), 0);

        c.toggle_mute();
        assert_eq!(c.slider_value(), 50);
        assert_eq!(c.volume_glyph(), VolumeGlyph::Low);

        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.play_glyph(), PlayGlyph::Play);
    }

    #[test]
    fn media_end_always_stops() {
        for steps in 0..3 {
            let mut c = controller(FakeBackend::loaded());
            for _ in 0..steps {
                c.toggle_play_pause();
            }

            assert_eq!(c.on_media_ended(), Flow::Continue);
            assert_eq!(c.state(), PlaybackState::Stopped);
            assert_eq!(c.play_glyph(), PlayGlyph::Play);
        }
    }

    #[test]
    fn quit_policy_exits_on_end_and_error() {
        init_logging();
        let mut c = PlaybackController::new(
            FakeBackend::loaded(),
            VolumeLevel::DEFAULT,
            EndOfMediaPolicy::Quit,
        );
        c.toggle_play_pause();

        assert_eq!(c.on_media_ended(), Flow::Quit);
        assert_eq!(c.on_media_error("decoder exploded"), Flow::Quit);
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn pump_dispatches_backend_events() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();

        let info = TrackInfo {
            path: PathBuf::from("song.mp3"),
            title: Some("Song".into()),
            artist: None,
            duration_ms: Some(180_000),
        };
        c.backend_mut().queued = vec![
            BackendEvent::MediaLoaded(info.clone()),
            BackendEvent::PositionChanged(1_200),
        ];
        assert_eq!(c.pump(), Flow::Continue);
        assert_eq!(c.track(), Some(&info));
        assert_eq!(c.progress().position_ms, 1_200);
        assert_eq!(c.progress().duration_ms, Some(180_000));

        c.backend_mut().queued = vec![BackendEvent::StatusChanged(MediaStatus::EndOfMedia)];
        c.pump();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.progress().position_ms, 0);
    }

    #[test]
    fn backend_error_event_is_recorded() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();
        c.backend_mut().queued = vec![BackendEvent::Error("codec".into())];

        c.pump();
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(
            c.last_error(),
            Some(&PlaybackError::Backend("codec".into()))
        );
    }

    #[test]
    fn load_resets_to_stopped() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();

        c.load(Path::new("other.mp3"));
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(c.play_glyph(), PlayGlyph::Play);
        assert_eq!(c.track().map(|t| t.path.clone()), Some(PathBuf::from("other.mp3")));
    }

    #[test]
    fn stop_from_paused() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();
        c.toggle_play_pause();

        c.stop();
        assert_eq!(c.state(), PlaybackState::Stopped);
        c.toggle_play_pause();
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn successful_ops_clear_previous_refusal() {
        let mut c = controller(FakeBackend::default());

        c.toggle_play_pause();
        assert_eq!(c.last_error(), Some(&PlaybackError::NoMediaLoaded));
        c.set_volume(60);
        assert!(c.last_error().is_none());

        c.toggle_play_pause();
        c.toggle_mute();
        assert!(c.last_error().is_none());

        c.toggle_play_pause();
        c.stop();
        assert!(c.last_error().is_none());
    }

    #[test]
    fn stale_position_after_stop_is_ignored() {
        let mut c = controller(FakeBackend::loaded());
        c.toggle_play_pause();
        c.backend_mut().queued = vec![BackendEvent::PositionChanged(4_800)];
        c.pump();
        assert_eq!(c.progress().position_ms, 4_800);

        c.backend_mut().queued = vec![BackendEvent::PositionChanged(5_000)];
        c.stop();
        c.pump();
        assert_eq!(c.progress().position_ms, 0);
    }

    #[test]
    fn initial_volume_zero_starts_muted() {
        init_logging();
        let mut c = PlaybackController::new(
            FakeBackend::default(),
            VolumeLevel::MUTE,
            EndOfMediaPolicy::Stop,
        );
        assert_eq!(c.slider_value(), 0);
        assert!(c.is_muted());
        assert_eq!(c.volume_glyph(), VolumeGlyph::Mute);

        c.toggle_mute();
        assert_eq!(c.slider_value(), 50);
    }

    #[test]
    fn initial_volume_becomes_saved_level() {
        init_logging();
        let level = VolumeLevel::new(80).unwrap();
        let c = PlaybackController::new(FakeBackend::default(), level, EndOfMediaPolicy::Stop);
        assert_eq!(c.slider_value(), 80);
        assert_eq!(c.saved_volume(), level);
    }

    #[test]
    fn refused_initial_volume_keeps_backend_level() {
        init_logging();
        let backend = FakeBackend {
            broken: true,
            ..FakeBackend::default()
        };
        let c = PlaybackController::new(
            backend,
            VolumeLevel::new(80).unwrap(),
            EndOfMediaPolicy::Stop,
        );
        assert_eq!(c.slider_value(), 50);
        assert_eq!(c.saved_volume(), VolumeLevel::DEFAULT);
        assert!(matches!(c.last_error(), Some(PlaybackError::Backend(_))));
    }

    #[test]
    fn invalid_media_drops_track() {
        let mut c = controller(FakeBackend::default());
        c.load(Path::new("broken.mp3"));
        assert!(c.track().is_some());

        c.backend_mut().queued = vec![
            BackendEvent::StatusChanged(MediaStatus::Invalid),
            BackendEvent::Error("Decode failed".into()),
        ];
        assert_eq!(c.pump(), Flow::Continue);
        assert!(c.track().is_none());
        assert_eq!(c.progress(), Progress::default());
        assert_eq!(c.state(), PlaybackState::Stopped);
        assert_eq!(
            c.last_error(),
            Some(&PlaybackError::Backend("Decode failed".into()))
        );
    }

    proptest! {
        #[test]
        fn set_volume_reaches_backend(v in 0u32..=100) {
            let mut c = controller(FakeBackend::default());
            c.set_volume(v);
            prop_assert_eq!(u32::from(c.backend().volume().percent()), v);
            prop_assert_eq!(u32::from(c.slider_value()), v);
        }

        #[test]
        fn mute_twice_restores_volume(v in 0u32..=100) {
            let mut c = controller(FakeBackend::default());
            c.set_volume(v);
            c.toggle_mute();
            c.toggle_mute();
            prop_assert_eq!(u32::from(c.volume().percent()), v);
        }
    }
}
