//! Top-level engine owning the music tracks.
//!
//! The host adds tracks, starts one of them, feeds condition changes and
//! pulls mixed audio through [`Engine::mix_to_buffer`].

mod controls;
mod info;
mod mixing;
mod settings;

use log::info;

use crate::error::EngineError;
use crate::track::MusicTrack;

pub use info::TracksInfo;
pub use settings::EngineSettings;

/// Owner of every track and of the global transport state.
#[derive(Debug)]
pub struct Engine {
    settings: EngineSettings,
    tracks: Vec<MusicTrack>,
    active: Option<usize>,
    paused: bool,
    volume: f32,
}

impl Engine {
    /// Create an engine with no tracks.
    ///
    /// Fails with [`EngineError::InvalidFormat`] for a zero sample rate or a
    /// channel count outside `1..=MAX_CHANNELS`.
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        info!(
            "engine ready: {} Hz, {} channel(s), {:?}",
            settings.sample_rate, settings.channels, settings.format
        );
        Ok(Self {
            settings,
            tracks: Vec::new(),
            active: None,
            paused: false,
            volume: clamp_volume(settings.volume),
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn sample_rate(&self) -> u32 {
        self.settings.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.settings.channels
    }

    /// Add a track. Track names are unique.
    pub fn add_track(&mut self, track: MusicTrack) -> Result<(), EngineError> {
        if self.index_of(track.name()).is_some() {
            return Err(EngineError::DuplicateTrack(track.name().to_string()));
        }
        self.tracks.push(track);
        Ok(())
    }

    /// Remove a track and hand it back to the caller.
    pub fn remove_track(&mut self, name: &str) -> Result<MusicTrack, EngineError> {
        let index = self.require(name)?;
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Ok(self.tracks.remove(index))
    }

    pub fn track(&self, name: &str) -> Option<&MusicTrack> {
        self.tracks.iter().find(|track| track.name() == name)
    }

    pub fn track_mut(&mut self, name: &str) -> Option<&mut MusicTrack> {
        self.tracks.iter_mut().find(|track| track.name() == name)
    }

    pub fn track_names(&self) -> Vec<&str> {
        self.tracks.iter().map(|track| track.name()).collect()
    }

    /// Name of the track last started with [`Engine::play_track`].
    pub fn active_track(&self) -> Option<&str> {
        self.active.map(|index| self.tracks[index].name())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.tracks.iter().position(|track| track.name() == name)
    }

    fn require(&self, name: &str) -> Result<usize, EngineError> {
        self.index_of(name)
            .ok_or_else(|| EngineError::UnknownTrack(name.to_string()))
    }
}

/// Clamp a master volume into `0.0..=1.0`; NaN mutes.
pub(super) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
