//! Audio clip contract consumed by tracks, plus an in-memory implementation.

mod buffer;
mod condition;
pub mod fade;
#[cfg(test)]
pub(crate) mod recording;

use serde::{Deserialize, Serialize};

use crate::mix::MixFrame;

pub use buffer::{BufferClip, ClipParams};
pub use condition::{Condition, ConditionType, MAIN_LOOP_CONDITION};

/// Role of a clip within its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Intro,
    #[default]
    Loop,
    End,
    Conditional,
}

impl ClipKind {
    /// Map a numeric definition code (`1` intro, `3` end, `4` conditional).
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Intro,
            3 => Self::End,
            4 => Self::Conditional,
            _ => Self::Loop,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Intro => 1,
            Self::Loop => 2,
            Self::End => 3,
            Self::Conditional => 4,
        }
    }
}

/// Fade durations in frames. `0` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipFades {
    pub fade_in: u32,
    pub fade_out: u32,
    pub xfade_in: u32,
    pub xfade_out: u32,
}

/// Index of a clip inside the track that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(pub(crate) usize);

impl ClipId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Playback contract for a single clip attached to a track.
///
/// Positions and durations are in frames. A clip owns its own cursor and
/// fade state; the track only drives it through this trait.
pub trait AudioClip: Send {
    fn kind(&self) -> ClipKind;

    /// Weight in `0..=100` for weighted-random selection.
    fn random_chance(&self) -> u32;

    fn min_movement_bars(&self) -> u32;

    fn fades(&self) -> ClipFades;

    fn condition(&self) -> Option<Condition>;

    fn set_pickable(&mut self, pickable: bool);

    fn is_pickable(&self) -> bool;

    /// Whether the clip carries a condition with the given id.
    fn has_condition(&self, id: i32) -> bool {
        self.condition().map_or(false, |condition| condition.id == id)
    }

    /// Evaluate the clip's condition for `value`. Clips without a matching
    /// condition never pass.
    fn evaluate_condition(&self, id: i32, value: i32) -> bool {
        self.condition()
            .map_or(false, |condition| condition.id == id && condition.test(value))
    }

    /// Rewind and prime for playback. Idempotent.
    fn open(&mut self);

    fn is_finished(&self) -> bool;

    fn is_tail_finished(&self, position: u64) -> bool;

    /// Mix one frame into `frame` and return the new position.
    ///
    /// With `from` set, the frame is read at that position without moving
    /// the clip cursor; otherwise the cursor and fades advance.
    fn advance_and_mix(&mut self, frame: &mut MixFrame<'_>, from: Option<u64>) -> u64;

    fn samples_elapsed(&self) -> u64;

    fn samples_total(&self) -> u64;

    fn bars_to_samples(&self, bars: u32) -> u64;

    fn trigger_fade_in(&mut self, duration: u32);

    fn trigger_fade_out(&mut self, duration: u32);

    fn source_id(&self) -> &str;
}
