use serde::Serialize;

use crate::track::TrackInfo;

use super::Engine;

/// Serializable summary of the engine and its tracks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TracksInfo {
    pub sample_rate: u32,
    pub channels: usize,
    pub volume: f32,
    pub paused: bool,
    pub active: Option<String>,
    pub tracks: Vec<TrackInfo>,
}

impl Engine {
    /// One `"{name}:{clips}"` line per track with something sounding.
    pub fn playing_info(&self) -> String {
        self.tracks
            .iter()
            .filter_map(|track| {
                let info = track.playing_info();
                (!info.is_empty()).then(|| format!("{}:{}", track.name(), info))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tracks_info(&self) -> TracksInfo {
        TracksInfo {
            sample_rate: self.settings.sample_rate,
            channels: self.settings.channels,
            volume: self.volume,
            paused: self.paused,
            active: self.active_track().map(str::to_string),
            tracks: self.tracks.iter().map(|track| track.info()).collect(),
        }
    }
}
