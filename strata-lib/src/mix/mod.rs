//! Sample summation primitives shared by tracks and the engine.

mod sample;

use serde::{Deserialize, Serialize};

pub use sample::{count_clipped, f32_to_i16, f32_to_i32, safe_add_i16, safe_add_i32};

/// Upper bound on interleaved channels mixed per frame.
pub const MAX_CHANNELS: usize = 8;

/// Host buffer sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFormat {
    #[default]
    F32,
    I16,
    I32,
}

/// Caller-owned interleaved output buffer handed to the engine.
pub enum MixOutput<'a> {
    F32(&'a mut [f32]),
    I16(&'a mut [i16]),
    I32(&'a mut [i32]),
}

impl MixOutput<'_> {
    /// Format of the wrapped buffer.
    pub fn format(&self) -> SampleFormat {
        match self {
            MixOutput::F32(_) => SampleFormat::F32,
            MixOutput::I16(_) => SampleFormat::I16,
            MixOutput::I32(_) => SampleFormat::I32,
        }
    }

    /// Number of interleaved samples in the buffer.
    pub fn len(&self) -> usize {
        match self {
            MixOutput::F32(buffer) => buffer.len(),
            MixOutput::I16(buffer) => buffer.len(),
            MixOutput::I32(buffer) => buffer.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a mixed frame into the buffer starting at sample `offset`.
    ///
    /// Float buffers are summed unclamped; integer buffers are scaled to
    /// full range and summed with clamping.
    pub(crate) fn add_frame(&mut self, offset: usize, frame: &[f32]) {
        match self {
            MixOutput::F32(buffer) => {
                for (dst, &value) in buffer[offset..offset + frame.len()].iter_mut().zip(frame) {
                    *dst += value;
                }
            }
            MixOutput::I16(buffer) => {
                for (dst, &value) in buffer[offset..offset + frame.len()].iter_mut().zip(frame) {
                    *dst = safe_add_i16(*dst, f32_to_i16(value));
                }
            }
            MixOutput::I32(buffer) => {
                for (dst, &value) in buffer[offset..offset + frame.len()].iter_mut().zip(frame) {
                    *dst = safe_add_i32(*dst, f32_to_i32(value));
                }
            }
        }
    }
}

/// One interleaved output frame that clips add their samples into.
///
/// The frame applies the owning track's gain to every contribution.
pub struct MixFrame<'a> {
    samples: &'a mut [f32],
    gain: f32,
}

impl<'a> MixFrame<'a> {
    pub fn new(samples: &'a mut [f32], gain: f32) -> Self {
        Self { samples, gain }
    }

    /// Channel count of the frame.
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Sum `value` into `channel`. Out-of-range channels are ignored.
    pub fn add(&mut self, channel: usize, value: f32) {
        if let Some(sample) = self.samples.get_mut(channel) {
            *sample += value * self.gain;
        }
    }

    /// Current summed value of `channel`.
    pub fn get(&self, channel: usize) -> f32 {
        self.samples.get(channel).copied().unwrap_or(0.0)
    }
}
