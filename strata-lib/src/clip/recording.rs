//! Scriptable clip that records the calls tracks make on it.

use std::sync::{Arc, Mutex};

use crate::mix::MixFrame;

use super::{AudioClip, ClipFades, ClipKind, Condition};

/// Shared call log, one entry per observable call (`open:a`, `fade_in:a:10`).
pub(crate) type EventLog = Arc<Mutex<Vec<String>>>;

pub(crate) fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn take_events(log: &EventLog) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

/// Clip with a fixed length, a fixed tail and a fixed bar length.
///
/// Every mixed frame adds `level` to channel 0.
pub(crate) struct RecordingClip {
    name: String,
    kind: ClipKind,
    random_chance: u32,
    min_movement_bars: u32,
    fades: ClipFades,
    condition: Option<Condition>,
    pickable: bool,
    length: u64,
    tail: u64,
    bar_frames: u64,
    level: f32,
    position: u64,
    fade_out_left: Option<u32>,
    log: EventLog,
}

impl RecordingClip {
    pub(crate) fn new(name: &str, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            kind: ClipKind::Loop,
            random_chance: 0,
            min_movement_bars: 0,
            fades: ClipFades::default(),
            condition: None,
            pickable: true,
            length: 100,
            tail: 0,
            bar_frames: 10,
            level: 1.0,
            position: 0,
            fade_out_left: None,
            log: log.clone(),
        }
    }

    pub(crate) fn with_kind(mut self, kind: ClipKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn with_chance(mut self, random_chance: u32) -> Self {
        self.random_chance = random_chance;
        self
    }

    pub(crate) fn with_movement(mut self, bars: u32, bar_frames: u64) -> Self {
        self.min_movement_bars = bars;
        self.bar_frames = bar_frames;
        self
    }

    pub(crate) fn with_fades(mut self, fades: ClipFades) -> Self {
        self.fades = fades;
        self
    }

    pub(crate) fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub(crate) fn with_length(mut self, length: u64, tail: u64) -> Self {
        self.length = length;
        self.tail = tail;
        self
    }

    pub(crate) fn with_level(mut self, level: f32) -> Self {
        self.level = level;
        self
    }

    pub(crate) fn boxed(self) -> Box<dyn AudioClip> {
        Box::new(self)
    }

    fn record(&self, event: String) {
        self.log.lock().unwrap().push(event);
    }
}

impl AudioClip for RecordingClip {
    fn kind(&self) -> ClipKind {
        self.kind
    }

    fn random_chance(&self) -> u32 {
        self.random_chance
    }

    fn min_movement_bars(&self) -> u32 {
        self.min_movement_bars
    }

    fn fades(&self) -> ClipFades {
        self.fades
    }

    fn condition(&self) -> Option<Condition> {
        self.condition
    }

    fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    fn is_pickable(&self) -> bool {
        self.pickable
    }

    fn open(&mut self) {
        self.position = 0;
        self.fade_out_left = None;
        self.record(format!("open:{}", self.name));
    }

    fn is_finished(&self) -> bool {
        self.fade_out_left == Some(0) || self.position >= self.length
    }

    fn is_tail_finished(&self, position: u64) -> bool {
        position >= self.length + self.tail
    }

    fn advance_and_mix(&mut self, frame: &mut MixFrame<'_>, from: Option<u64>) -> u64 {
        frame.add(0, self.level);
        match from {
            Some(position) => position + 1,
            None => {
                self.position += 1;
                if let Some(left) = self.fade_out_left.as_mut() {
                    *left = left.saturating_sub(1);
                }
                self.position
            }
        }
    }

    fn samples_elapsed(&self) -> u64 {
        self.position
    }

    fn samples_total(&self) -> u64 {
        self.length + self.tail
    }

    fn bars_to_samples(&self, bars: u32) -> u64 {
        bars as u64 * self.bar_frames
    }

    fn trigger_fade_in(&mut self, duration: u32) {
        self.record(format!("fade_in:{}:{}", self.name, duration));
    }

    fn trigger_fade_out(&mut self, duration: u32) {
        self.fade_out_left = Some(duration);
        self.record(format!("fade_out:{}:{}", self.name, duration));
    }

    fn source_id(&self) -> &str {
        &self.name
    }
}
