//! In-memory clip backed by decoded interleaved samples.

use std::sync::Arc;

use crate::mix::MixFrame;

use super::fade::FadeRamp;
use super::{AudioClip, ClipFades, ClipKind, Condition};

/// Musical and playback parameters for a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipParams {
    pub kind: ClipKind,
    pub random_chance: u32,
    pub min_movement_bars: u32,
    pub fades: ClipFades,
    pub condition: Option<Condition>,
    pub bpm: f32,
    pub beats_per_bar: u32,
    /// Length of the loop region in bars. `0` plays the whole buffer.
    pub bars: u32,
    pub volume: f32,
}

impl Default for ClipParams {
    fn default() -> Self {
        Self {
            kind: ClipKind::Loop,
            random_chance: 0,
            min_movement_bars: 0,
            fades: ClipFades::default(),
            condition: None,
            bpm: 0.0,
            beats_per_bar: 4,
            bars: 0,
            volume: 1.0,
        }
    }
}

/// Clip over a shared, already-decoded sample buffer.
///
/// Frames past the loop region form the release tail that keeps ringing
/// after the track has moved on.
#[derive(Debug, Clone)]
pub struct BufferClip {
    source: String,
    samples: Arc<[f32]>,
    channels: usize,
    sample_rate: u32,
    params: ClipParams,
    pickable: bool,
    position: u64,
    loop_end: u64,
    fade_in: Option<FadeRamp>,
    fade_out: Option<FadeRamp>,
}

impl BufferClip {
    /// Create a clip from interleaved samples.
    ///
    /// A channel count of zero is treated as mono.
    pub fn new(
        source: impl Into<String>,
        samples: impl Into<Arc<[f32]>>,
        channels: usize,
        sample_rate: u32,
        params: ClipParams,
    ) -> Self {
        let mut clip = Self {
            source: source.into(),
            samples: samples.into(),
            channels: channels.max(1),
            sample_rate,
            params,
            pickable: true,
            position: 0,
            loop_end: 0,
            fade_in: None,
            fade_out: None,
        };
        let total = clip.samples_total();
        clip.loop_end = match clip.params.bars {
            0 => total,
            bars => match clip.bars_to_samples(bars) {
                0 => total,
                frames => frames.min(total),
            },
        };
        clip
    }

    pub fn params(&self) -> &ClipParams {
        &self.params
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frame index at which the loop region ends.
    pub fn loop_end(&self) -> u64 {
        self.loop_end
    }

    fn read_into(&self, frame: &mut MixFrame<'_>, position: u64, gain: f32) {
        let base = position as usize * self.channels;
        for channel in 0..frame.channels() {
            let value = self.samples[base + channel % self.channels];
            frame.add(channel, value * gain);
        }
    }
}

impl AudioClip for BufferClip {
    fn kind(&self) -> ClipKind {
        self.params.kind
    }

    fn random_chance(&self) -> u32 {
        self.params.random_chance.min(100)
    }

    fn min_movement_bars(&self) -> u32 {
        self.params.min_movement_bars
    }

    fn fades(&self) -> ClipFades {
        self.params.fades
    }

    fn condition(&self) -> Option<Condition> {
        self.params.condition
    }

    fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    fn is_pickable(&self) -> bool {
        self.pickable
    }

    fn open(&mut self) {
        self.position = 0;
        self.fade_in = None;
        self.fade_out = None;
    }

    fn is_finished(&self) -> bool {
        if self.fade_out.map_or(false, |fade| fade.is_complete()) {
            return true;
        }
        self.position >= self.loop_end
    }

    fn is_tail_finished(&self, position: u64) -> bool {
        position >= self.samples_total()
    }

    fn advance_and_mix(&mut self, frame: &mut MixFrame<'_>, from: Option<u64>) -> u64 {
        if let Some(position) = from {
            if position >= self.samples_total() {
                return position;
            }
            self.read_into(frame, position, self.params.volume);
            return position + 1;
        }

        if self.position >= self.samples_total() {
            return self.position;
        }

        let mut gain = self.params.volume;
        if let Some(fade) = self.fade_in.as_mut() {
            gain *= fade.gain();
            fade.advance();
        }
        if let Some(fade) = self.fade_out.as_mut() {
            gain *= fade.gain();
            fade.advance();
        }
        if self.fade_in.map_or(false, |fade| fade.is_complete()) {
            self.fade_in = None;
        }

        self.read_into(frame, self.position, gain);
        self.position += 1;
        self.position
    }

    fn samples_elapsed(&self) -> u64 {
        self.position
    }

    fn samples_total(&self) -> u64 {
        (self.samples.len() / self.channels) as u64
    }

    fn bars_to_samples(&self, bars: u32) -> u64 {
        if self.params.bpm <= 0.0 || self.sample_rate == 0 {
            return 0;
        }
        let seconds_per_bar = 60.0 / self.params.bpm as f64 * self.params.beats_per_bar as f64;
        (bars as f64 * seconds_per_bar * self.sample_rate as f64).round() as u64
    }

    fn trigger_fade_in(&mut self, duration: u32) {
        self.fade_in = Some(FadeRamp::fade_in(duration));
    }

    fn trigger_fade_out(&mut self, duration: u32) {
        self.fade_out = Some(FadeRamp::fade_out(duration));
    }

    fn source_id(&self) -> &str {
        &self.source
    }
}
