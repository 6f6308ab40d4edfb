//! Next-clip selection and cross-fade initiation.

use log::debug;

use crate::clip::{ClipId, ClipKind};

use super::{MusicTrack, TailState};

impl MusicTrack {
    /// Advance to the next clip after the current one finished or was
    /// released without an explicit target.
    pub(super) fn play_next(&mut self) {
        if let Some(current) = self.current {
            let clip = &mut self.clips[current.0];
            match clip.kind() {
                ClipKind::Conditional => {
                    // Loop in place while the condition holds; the finished
                    // pass keeps ringing as the tail.
                    self.tail = Some(TailState {
                        clip: current,
                        position: clip.samples_elapsed(),
                    });
                    clip.open();
                    return;
                }
                // No track operation starts the end clip; hosts that drive
                // one into `current` get it rung out here.
                ClipKind::End => {
                    self.tail = Some(TailState {
                        clip: current,
                        position: clip.samples_elapsed(),
                    });
                    self.current = None;
                    debug!("track {}: end clip ringing out", self.name);
                    return;
                }
                ClipKind::Intro | ClipKind::Loop => {}
            }
        }

        if self.fading.is_none() {
            self.fading = self.current;
        }

        let next = self.pick_next();
        self.current = next;
        if let Some(id) = next {
            self.clips[id.0].open();
        }
        debug!("track {}: next clip {}", self.name, self.label(next));

        if self.fading != self.current {
            self.start_crossfade();
        } else {
            self.fading = None;
        }
    }

    /// Choose the clip that follows the current one, if any is eligible.
    pub(super) fn pick_next(&mut self) -> Option<ClipId> {
        let between_weighted = self
            .current
            .map_or(true, |id| self.clips[id.0].random_chance() > 0);
        if !self.weighted.is_empty() && between_weighted {
            for &id in &self.weighted {
                let chance = self.clips[id.0].random_chance();
                if self.random.draw(0, 100) <= chance {
                    return Some(id);
                }
            }
        }

        match self.loops.len() {
            0 => None,
            1 => Some(self.loops[0]),
            _ => {
                debug_assert!(self.candidates.capacity() >= self.loops.len());
                self.candidates.clear();
                for &id in &self.loops {
                    if self.clips[id.0].is_pickable() {
                        self.candidates.push(id);
                    }
                }
                match self.candidates.len() {
                    0 => None,
                    1 => Some(self.candidates[0]),
                    _ => {
                        // No immediate repeat while an alternative exists.
                        if let Some(current) = self.current {
                            self.candidates.retain(|&id| id != current);
                        }
                        let last = (self.candidates.len() - 1) as u32;
                        let index = self.random.draw(0, last) as usize;
                        self.candidates.get(index).copied()
                    }
                }
            }
        }
    }

    /// Fade the incoming `current` clip in and the `fading` clip out.
    ///
    /// Durations resolve incoming clip, then outgoing clip, then track. An
    /// outgoing clip with no resolvable fade-out is released immediately.
    pub(super) fn start_crossfade(&mut self) {
        let incoming = self.current.map(|id| self.clips[id.0].fades());
        let outgoing = self.fading.map(|id| self.clips[id.0].fades());

        if let Some(id) = self.current {
            let duration = first_set([
                incoming.map_or(0, |fades| fades.xfade_in),
                outgoing.map_or(0, |fades| fades.xfade_in),
                self.fades.xfade_in,
            ]);
            if duration > 0 {
                self.clips[id.0].trigger_fade_in(duration);
            }
        }

        if let Some(id) = self.fading {
            let duration = first_set([
                incoming.map_or(0, |fades| fades.xfade_out),
                outgoing.map_or(0, |fades| fades.xfade_out),
                self.fades.xfade_out,
            ]);
            if duration > 0 {
                self.clips[id.0].trigger_fade_out(duration);
            } else {
                self.fading = None;
            }
        }
    }
}

fn first_set(durations: [u32; 3]) -> u32 {
    durations.into_iter().find(|&frames| frames > 0).unwrap_or(0)
}
