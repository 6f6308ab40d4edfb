//! Engine output configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::mix::{SampleFormat, MAX_CHANNELS};

/// Output format and global mix settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    pub sample_rate: u32,
    pub channels: usize,
    pub format: SampleFormat,
    pub volume: f32,
    /// Report summed samples outside `-1.0..=1.0` after each mix.
    pub debug_clipping: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            format: SampleFormat::F32,
            volume: 1.0,
            debug_clipping: false,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sample_rate == 0 {
            return Err(EngineError::InvalidFormat(
                "sample rate must be greater than zero".to_string(),
            ));
        }
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            return Err(EngineError::InvalidFormat(format!(
                "channel count {} outside 1..={}",
                self.channels, MAX_CHANNELS
            )));
        }
        Ok(())
    }

    /// Convert a duration in milliseconds to frames at the output rate.
    pub fn ms_to_frames(&self, ms: f32) -> u32 {
        if !ms.is_finite() || ms <= 0.0 {
            return 0;
        }
        (ms / 1000.0 * self.sample_rate as f32).round() as u32
    }
}
