//! Per-frame mixing and transition bookkeeping.

use log::{debug, warn};

use crate::mix::{count_clipped, MixFrame};

use super::{MusicTrack, TailState};

impl MusicTrack {
    /// Sum this track's active clips into an interleaved buffer.
    ///
    /// Frames are processed one at a time so clip completion, fades and
    /// scheduled switches land on exact frames. A trailing partial frame is
    /// left untouched. With `debug_clipping` set, summed samples outside
    /// `-1.0..=1.0` are reported; they are never altered.
    pub fn mix(&mut self, buffer: &mut [f32], channels: usize, debug_clipping: bool) {
        if channels == 0 {
            return;
        }
        let _guard = self.lock.acquire();

        let mut clipped = 0;
        for samples in buffer.chunks_exact_mut(channels) {
            self.mix_frame(samples);
            if debug_clipping {
                clipped += count_clipped(samples);
            }
        }

        if clipped > 0 {
            warn!(
                "track {}: {} sample(s) out of range in mixed buffer",
                self.name, clipped
            );
        }
    }

    fn mix_frame(&mut self, samples: &mut [f32]) {
        let mut frame = MixFrame::new(samples, self.volume);

        if let Some(id) = self.current {
            self.clips[id.0].advance_and_mix(&mut frame, None);
        }

        if let Some(tail) = self.tail {
            let clip = &mut self.clips[tail.clip.0];
            let position = clip.advance_and_mix(&mut frame, Some(tail.position));
            self.tail = if clip.is_tail_finished(position) {
                None
            } else {
                Some(TailState { position, ..tail })
            };
        }

        if let Some(id) = self.fading {
            self.clips[id.0].advance_and_mix(&mut frame, None);
        }

        if let Some(id) = self.current {
            let clip = &self.clips[id.0];
            if clip.is_finished() {
                let position = clip.samples_elapsed();
                debug!(
                    "track {}: {} finished at {}, ringing out",
                    self.name,
                    clip.source_id(),
                    position
                );
                self.tail = Some(TailState { clip: id, position });
                self.play_next();
            }
        }

        if let Some(id) = self.fading {
            if self.clips[id.0].is_finished() {
                self.fading = None;
            }
        }

        if let Some(mut pending) = self.pending {
            pending.remaining = pending.remaining.saturating_sub(1);
            if pending.remaining == 0 {
                self.pending = None;
                self.switch_to(pending.target);
            } else {
                self.pending = Some(pending);
            }
        }
    }
}
