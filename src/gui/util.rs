//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use std::path::Path;

use crate::core::types::{Progress, TrackInfo};

/// Gets filename without extension, used as a fallback title.
/// Ex: 'song.mp3' -> 'song'
pub(crate) fn filename_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown Title")
        .to_string()
}

/// "Title - Artist", falling back to whatever we have.
pub(crate) fn song_label(track: Option<&TrackInfo>) -> String {
    let Some(t) = track else {
        return "No media loaded".to_string();
    };

    let title = t.title.clone().unwrap_or_else(|| filename_stem(&t.path));
    match &t.artist {
        Some(artist) => format!("{title} - {artist}"),
        None => title,
    }
}

pub(crate) fn fmt_ms(ms: u64) -> String {
    let s = ms / 1000;
    let m = s / 60;
    let s = s % 60;
    format!("{m}:{s:02}")
}

pub(crate) fn time_text(progress: Progress) -> String {
    match progress.duration_ms {
        Some(dur) => format!("{} / {}", fmt_ms(progress.position_ms.min(dur)), fmt_ms(dur)),
        None => format!("{} / -:--", fmt_ms(progress.position_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(title: Option<&str>, artist: Option<&str>) -> TrackInfo {
        TrackInfo {
            path: PathBuf::from("music/some song.mp3"),
            title: title.map(str::to_string),
            artist: artist.map(str::to_string),
            duration_ms: None,
        }
    }

    #[test]
    fn label_fallbacks() {
        assert_eq!(song_label(None), "No media loaded");
        assert_eq!(song_label(Some(&track(None, None))), "some song");
        assert_eq!(song_label(Some(&track(Some("Tide"), None))), "Tide");
        assert_eq!(
            song_label(Some(&track(Some("Tide"), Some("Wave Band")))),
            "Tide - Wave Band"
        );
        assert_eq!(
            song_label(Some(&track(None, Some("Wave Band")))),
            "some song - Wave Band"
        );
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(fmt_ms(0), "0:00");
        assert_eq!(fmt_ms(59_999), "0:59");
        assert_eq!(fmt_ms(61_000), "1:01");
        assert_eq!(fmt_ms(3_600_000), "60:00");
    }

    #[test]
    fn time_text_with_and_without_duration() {
        let known = Progress {
            position_ms: 5_000,
            duration_ms: Some(125_000),
        };
        assert_eq!(time_text(known), "0:05 / 2:05");

        let unknown = Progress {
            position_ms: 5_000,
            duration_ms: None,
        };
        assert_eq!(time_text(unknown), "0:05 / -:--");
    }
}
