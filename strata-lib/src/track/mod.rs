//! Music track: clip classification, transitions and per-frame mixing.
//!
//! A track owns its clips in an arena and refers to them by [`ClipId`].
//! At any moment up to three clips may sound: the `current` clip, the
//! `tail` of a clip that already finished its loop region, and a `fading`
//! clip being cross-faded out.

mod condition;
mod info;
mod lock;
mod mix;
mod select;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::clip::{AudioClip, ClipId, ClipKind, MAIN_LOOP_CONDITION};
use crate::error::TrackError;
use crate::random::{entropy_source, RandomSource};

pub use info::TrackInfo;
pub use lock::{MixGuard, MixLock};

/// Track-level fade durations in frames. `0` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackFades {
    pub fade_in: u32,
    pub fade_out: u32,
    pub xfade_in: u32,
    pub xfade_out: u32,
}

/// Group a clip is routed into when attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipGroup {
    Intro,
    End,
    Conditional,
    Weighted,
    Loop,
}

impl ClipGroup {
    /// Route by kind first, then by random weight.
    pub fn classify(kind: ClipKind, random_chance: u32) -> Self {
        match kind {
            ClipKind::Intro => Self::Intro,
            ClipKind::End => Self::End,
            ClipKind::Conditional => Self::Conditional,
            ClipKind::Loop if random_chance > 0 => Self::Weighted,
            ClipKind::Loop => Self::Loop,
        }
    }
}

/// A clip ringing out past its loop region, read from its own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailState {
    pub clip: ClipId,
    pub position: u64,
}

/// Condition-triggered switch waiting for a movement boundary.
///
/// `target == None` falls back to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwitch {
    pub target: Option<ClipId>,
    pub remaining: u64,
}

pub struct MusicTrack {
    name: String,
    clips: Vec<Box<dyn AudioClip>>,
    intro: Option<ClipId>,
    end: Option<ClipId>,
    loops: Vec<ClipId>,
    weighted: Vec<ClipId>,
    conditional: Vec<ClipId>,
    // Scratch for pickable loop filtering, sized to `loops` at attach time.
    candidates: Vec<ClipId>,
    fades: TrackFades,
    volume: f32,
    current: Option<ClipId>,
    fading: Option<ClipId>,
    tail: Option<TailState>,
    pending: Option<PendingSwitch>,
    lock: MixLock,
    random: Box<dyn RandomSource>,
}

impl MusicTrack {
    /// Create an empty track with an entropy-seeded random source.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_random(name, entropy_source())
    }

    /// Create an empty track drawing selections from `random`.
    pub fn with_random(name: impl Into<String>, random: Box<dyn RandomSource>) -> Self {
        Self {
            name: name.into(),
            clips: Vec::new(),
            intro: None,
            end: None,
            loops: Vec::new(),
            weighted: Vec::new(),
            conditional: Vec::new(),
            candidates: Vec::new(),
            fades: TrackFades::default(),
            volume: 1.0,
            current: None,
            fading: None,
            tail: None,
            pending: None,
            lock: MixLock::new(),
            random,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn fades(&self) -> TrackFades {
        self.fades
    }

    pub fn set_fades(&mut self, fades: TrackFades) {
        self.fades = fades;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Gain multiplier applied to everything this track mixes.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.max(0.0)
        } else {
            1.0
        };
    }

    /// Replace the selection random source.
    pub fn set_random(&mut self, random: Box<dyn RandomSource>) {
        self.random = random;
    }

    /// Handle to the reentrancy counter raised while [`MusicTrack::mix`] runs.
    pub fn mix_lock(&self) -> MixLock {
        self.lock.clone()
    }

    /// Attach a clip and route it into its group.
    ///
    /// A track keeps at most one intro and one end clip; attaching another
    /// replaces the previous one in place (last attached wins).
    pub fn attach_clip(&mut self, clip: Box<dyn AudioClip>) -> ClipId {
        let group = ClipGroup::classify(clip.kind(), clip.random_chance());
        let existing = match group {
            ClipGroup::Intro => self.intro,
            ClipGroup::End => self.end,
            _ => None,
        };
        if let Some(id) = existing {
            warn!(
                "track {}: replacing {:?} clip {} with {}",
                self.name,
                group,
                self.clips[id.0].source_id(),
                clip.source_id()
            );
            self.release(id);
            self.clips[id.0] = clip;
            return id;
        }

        let id = ClipId(self.clips.len());
        self.clips.push(clip);
        match group {
            ClipGroup::Intro => self.intro = Some(id),
            ClipGroup::End => self.end = Some(id),
            ClipGroup::Conditional => self.conditional.push(id),
            ClipGroup::Weighted => self.weighted.push(id),
            ClipGroup::Loop => {
                self.loops.push(id);
                self.candidates.reserve(self.loops.len());
            }
        }
        id
    }

    pub fn clip(&self, id: ClipId) -> Option<&dyn AudioClip> {
        self.clips.get(id.0).map(|clip| clip.as_ref())
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn intro(&self) -> Option<ClipId> {
        self.intro
    }

    pub fn end(&self) -> Option<ClipId> {
        self.end
    }

    pub fn loops(&self) -> &[ClipId] {
        &self.loops
    }

    pub fn weighted(&self) -> &[ClipId] {
        &self.weighted
    }

    pub fn conditional(&self) -> &[ClipId] {
        &self.conditional
    }

    pub fn current(&self) -> Option<ClipId> {
        self.current
    }

    pub fn fading(&self) -> Option<ClipId> {
        self.fading
    }

    pub fn tail(&self) -> Option<TailState> {
        self.tail
    }

    pub fn pending_switch(&self) -> Option<PendingSwitch> {
        self.pending
    }

    /// Start playback from the intro clip, or from a freshly picked clip.
    ///
    /// Fails with [`TrackError::Locked`] while a mix is in flight.
    pub fn play(&mut self) -> Result<(), TrackError> {
        self.ensure_unlocked()?;

        let was_idle = self.current.is_none();
        self.fading = None;
        self.refresh_main_loop(0);

        match self.intro {
            Some(intro) => {
                self.current = Some(intro);
                self.clips[intro.0].open();
            }
            None => self.play_next(),
        }

        if was_idle {
            if let Some(id) = self.current {
                let clip = &mut self.clips[id.0];
                let fade_in = match clip.fades().fade_in {
                    0 => self.fades.fade_in,
                    frames => frames,
                };
                if fade_in > 0 {
                    clip.trigger_fade_in(fade_in);
                }
            }
        }

        info!(
            "track {} playing: {}",
            self.name,
            self.current
                .map(|id| self.clips[id.0].source_id())
                .unwrap_or("nothing")
        );
        Ok(())
    }

    /// Stop playback, fading the current clip out when a track fade-out is set.
    ///
    /// Any scheduled condition switch is abandoned and the tail is dropped.
    pub fn stop(&mut self) {
        self.pending = None;
        self.tail = None;
        self.fading = None;

        if let Some(id) = self.current.take() {
            if self.fades.fade_out > 0 {
                self.clips[id.0].trigger_fade_out(self.fades.fade_out);
                self.fading = Some(id);
            }
        }
        info!("track {} stopped", self.name);
    }

    fn ensure_unlocked(&self) -> Result<(), TrackError> {
        if self.lock.is_held() {
            return Err(TrackError::Locked {
                track: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Re-evaluate pickability of loop clips carrying the main-loop condition.
    fn refresh_main_loop(&mut self, value: i32) {
        for id in &self.loops {
            let clip = &mut self.clips[id.0];
            if clip.has_condition(MAIN_LOOP_CONDITION) {
                let pickable = clip.evaluate_condition(MAIN_LOOP_CONDITION, value);
                clip.set_pickable(pickable);
            }
        }
    }

    /// Drop every playback reference to `id`.
    fn release(&mut self, id: ClipId) {
        if self.current == Some(id) {
            self.current = None;
        }
        if self.fading == Some(id) {
            self.fading = None;
        }
        if self.tail.map_or(false, |tail| tail.clip == id) {
            self.tail = None;
        }
        if self.pending.map_or(false, |pending| pending.target == Some(id)) {
            self.pending = None;
        }
    }
}

impl std::fmt::Debug for MusicTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicTrack")
            .field("name", &self.name)
            .field("clips", &self.clips.len())
            .field("current", &self.current)
            .field("fading", &self.fading)
            .field("tail", &self.tail)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests;
