//! Engine output mixing.

use log::warn;

use crate::error::EngineError;
use crate::mix::{count_clipped, MixOutput, MAX_CHANNELS};

use super::Engine;

impl Engine {
    /// Mix every track into `output`, adding to what the buffer holds.
    ///
    /// Tracks advance one frame at a time. Float buffers receive the summed
    /// value unclamped; integer buffers are scaled to full range and summed
    /// with saturation. While paused the buffer is left untouched. A
    /// trailing partial frame is ignored.
    pub fn mix_to_buffer(&mut self, mut output: MixOutput<'_>) -> Result<(), EngineError> {
        if output.format() != self.settings.format {
            return Err(EngineError::InvalidFormat(format!(
                "buffer is {:?}, engine outputs {:?}",
                output.format(),
                self.settings.format
            )));
        }
        if self.paused {
            return Ok(());
        }

        let channels = self.settings.channels;
        let frames = output.len() / channels;
        let mut scratch = [0.0_f32; MAX_CHANNELS];
        let mut clipped = 0;

        for index in 0..frames {
            let frame = &mut scratch[..channels];
            frame.fill(0.0);
            for track in &mut self.tracks {
                track.mix(frame, channels, false);
            }
            for sample in frame.iter_mut() {
                *sample *= self.volume;
            }
            if self.settings.debug_clipping {
                clipped += count_clipped(frame);
            }
            output.add_frame(index * channels, frame);
        }

        if clipped > 0 {
            warn!("{} sample(s) out of range in engine output", clipped);
        }
        Ok(())
    }
}
