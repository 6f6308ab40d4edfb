//! Playback introspection for hosts and diagnostics.

use std::fmt::Write;

use serde::Serialize;

use super::MusicTrack;

/// Static and playback summary of a track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackInfo {
    pub name: String,
    pub intro: bool,
    pub end: bool,
    pub loops: usize,
    pub weighted: usize,
    pub conditional: usize,
    pub volume: f32,
    pub playing: bool,
}

impl MusicTrack {
    /// True while a current clip or a ringing tail is active.
    pub fn is_playing(&self) -> bool {
        self.current.is_some() || self.tail.is_some()
    }

    /// Human-readable snapshot of the active clips and their positions.
    ///
    /// Empty when nothing is active.
    pub fn playing_info(&self) -> String {
        let mut info = String::new();
        if let Some(id) = self.current {
            let clip = &self.clips[id.0];
            let _ = write!(
                info,
                " current = {} (pos={})",
                clip.source_id(),
                clip.samples_elapsed()
            );
        }
        if let Some(tail) = self.tail {
            let _ = write!(
                info,
                " tail = {} (pos={})",
                self.clips[tail.clip.0].source_id(),
                tail.position
            );
        }
        if let Some(id) = self.fading {
            let clip = &self.clips[id.0];
            let _ = write!(
                info,
                " fading = {} (pos={})",
                clip.source_id(),
                clip.samples_elapsed()
            );
        }
        info
    }

    pub fn info(&self) -> TrackInfo {
        TrackInfo {
            name: self.name.clone(),
            intro: self.intro.is_some(),
            end: self.end.is_some(),
            loops: self.loops.len(),
            weighted: self.weighted.len(),
            conditional: self.conditional.len(),
            volume: self.volume,
            playing: self.is_playing(),
        }
    }
}
