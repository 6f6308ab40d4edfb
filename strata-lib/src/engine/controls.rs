//! Transport, volume and condition controls for `Engine`.

use log::{info, warn};

use crate::clip::MAIN_LOOP_CONDITION;
use crate::error::{EngineError, TrackError};

use super::{clamp_volume, Engine};

impl Engine {
    /// Start a track, stopping the previously active one.
    ///
    /// A track that is mid-mix rejects the call with [`EngineError::Locked`]
    /// and nothing changes.
    pub fn play_track(&mut self, name: &str) -> Result<(), EngineError> {
        let index = self.require(name)?;
        if let Err(err) = self.tracks[index].play() {
            warn!("play {} rejected: {}", name, err);
            return Err(err.into());
        }

        if let Some(previous) = self.active.filter(|&previous| previous != index) {
            info!(
                "switching track {} -> {}",
                self.tracks[previous].name(),
                name
            );
            self.tracks[previous].stop();
        }
        self.active = Some(index);
        self.paused = false;
        Ok(())
    }

    /// Stop every track.
    pub fn stop_playing(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
        self.active = None;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn pause_toggle(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the master volume, clamped to `0.0..=1.0`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Broadcast a condition value to every track.
    ///
    /// Every unlocked track receives the update; the first rejection is
    /// returned.
    pub fn set_condition(&mut self, id: i32, value: i32) -> Result<(), EngineError> {
        let mut rejected: Option<TrackError> = None;
        for track in &mut self.tracks {
            if let Err(err) = track.set_condition(id, value) {
                warn!("condition {}={} rejected: {}", id, value, err);
                rejected.get_or_insert(err);
            }
        }
        match rejected {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    pub fn set_main_loop_condition(&mut self, value: i32) -> Result<(), EngineError> {
        self.set_condition(MAIN_LOOP_CONDITION, value)
    }

    /// True while any track has a current clip or a ringing tail.
    pub fn is_playing(&self) -> bool {
        self.tracks.iter().any(|track| track.is_playing())
    }

    pub fn is_track_playing(&self, name: &str) -> bool {
        self.track(name).map_or(false, |track| track.is_playing())
    }
}
