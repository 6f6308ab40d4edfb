//! Condition-driven switching between clips.

use log::{debug, trace};

use crate::clip::{ClipId, MAIN_LOOP_CONDITION};
use crate::error::TrackError;

use super::{MusicTrack, PendingSwitch};

impl MusicTrack {
    /// Apply a host condition change.
    ///
    /// Ignored while a scheduled switch is pending. The main-loop id only
    /// updates loop pickability (and starts playback when idle); any other
    /// id may switch to, or fall back from, a conditional clip.
    pub fn set_condition(&mut self, id: i32, value: i32) -> Result<(), TrackError> {
        self.ensure_unlocked()?;
        self.apply_condition(id, value);
        Ok(())
    }

    pub(super) fn apply_condition(&mut self, id: i32, value: i32) {
        if let Some(pending) = self.pending {
            trace!(
                "track {}: condition {}={} ignored, switch pending in {} frame(s)",
                self.name,
                id,
                value,
                pending.remaining
            );
            return;
        }

        if id == MAIN_LOOP_CONDITION {
            self.refresh_main_loop(value);
            if self.current.is_none() {
                self.play_next();
            }
            return;
        }

        let mut start: Option<ClipId> = None;
        let mut stop = false;
        for &clip_id in &self.conditional {
            let clip = &self.clips[clip_id.0];
            if !clip.has_condition(id) {
                continue;
            }
            let matches = clip.evaluate_condition(id, value);
            if self.current == Some(clip_id) {
                stop |= !matches;
            } else if matches {
                // Later matches overwrite earlier ones.
                start = Some(clip_id);
            }
        }

        // A newly matching clip wins over falling back to the main loop.
        if let Some(target) = start {
            self.request_switch(Some(target));
        } else if stop {
            self.request_switch(None);
        }
    }

    /// Switch now, or on the next movement boundary of the current clip.
    fn request_switch(&mut self, target: Option<ClipId>) {
        let movement_bars = self
            .current
            .map_or(0, |id| self.clips[id.0].min_movement_bars());
        if movement_bars == 0 {
            self.switch_to(target);
        } else {
            self.schedule_switch(target);
        }
    }

    fn schedule_switch(&mut self, target: Option<ClipId>) {
        let Some(current) = self.current else {
            self.switch_to(target);
            return;
        };

        let clip = &self.clips[current.0];
        let bars = clip.min_movement_bars();
        let block = clip.bars_to_samples(bars);
        let elapsed = clip.samples_elapsed();
        let remaining = if block == 0 {
            0
        } else {
            let blocks = u32::try_from(elapsed / block + 1).unwrap_or(u32::MAX);
            clip.bars_to_samples(bars.saturating_mul(blocks))
                .saturating_sub(elapsed)
        };

        if remaining == 0 {
            self.switch_to(target);
            return;
        }

        debug!(
            "track {}: switch to {} scheduled in {} frame(s)",
            self.name,
            self.label(target),
            remaining
        );
        self.pending = Some(PendingSwitch { target, remaining });
    }

    /// Replace the current clip, cross-fading from it.
    ///
    /// With no target the next clip is picked from the loop pools.
    pub(super) fn switch_to(&mut self, target: Option<ClipId>) {
        debug!(
            "track {}: switching {} -> {}",
            self.name,
            self.label(self.current),
            self.label(target)
        );
        self.fading = self.current;
        self.current = target;
        match target {
            Some(id) => {
                self.clips[id.0].open();
                self.start_crossfade();
            }
            None => self.play_next(),
        }
    }

    pub(super) fn label(&self, id: Option<ClipId>) -> &str {
        match id {
            Some(id) => self.clips[id.0].source_id(),
            None => "main loop",
        }
    }
}
