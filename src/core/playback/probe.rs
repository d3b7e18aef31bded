//! core/playback/probe.rs
//! Cheap header probe (Symphonia): duration + title/artist for the song label.
//! Nothing is decoded here.

use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::{MetadataOptions, MetadataRevision, StandardTagKey};
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

use crate::core::error::{PlaybackError, Result};
use crate::core::types::TrackInfo;

pub fn probe_track(path: &Path) -> Result<TrackInfo> {
    let file = File::open(path).map_err(|e| PlaybackError::Backend(format!("Open failed: {e}")))?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PlaybackError::Backend(format!("Format probe failed: {e}")))?;

    let mut info = TrackInfo::from_path(path.to_path_buf());

    // ID3 and friends sit in front of the container; the rest lives inside it.
    if let Some(meta) = probed.metadata.get() {
        if let Some(rev) = meta.current() {
            read_tags(rev, &mut info);
        }
    }

    let mut format = probed.format;
    {
        let meta = format.metadata();
        if let Some(rev) = meta.current() {
            read_tags(rev, &mut info);
        }
    }

    if let Some(track) = format.default_track() {
        info.duration_ms =
            duration_from_params(track.codec_params.time_base, track.codec_params.n_frames);
    }

    Ok(info)
}

/// First non-empty value wins.
fn read_tags(rev: &MetadataRevision, info: &mut TrackInfo) {
    for tag in rev.tags() {
        let slot = match tag.std_key {
            Some(StandardTagKey::TrackTitle) => &mut info.title,
            Some(StandardTagKey::Artist) => &mut info.artist,
            _ => continue,
        };

        if slot.is_none() {
            let value = tag.value.to_string();
            let value = value.trim();
            if !value.is_empty() {
                *slot = Some(value.to_string());
            }
        }
    }
}

fn duration_from_params(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let tb = time_base?;
    let frames = n_frames?;

    let t = tb.calc_time(frames);
    let ms = (t.seconds as f64 * 1000.0) + (t.frac * 1000.0);
    Some(ms.round() as u64)
}
