//! # Strata Adaptive Music Library
//!
//! Track-level playback and mixing for adaptive game music. Each
//! [`track::MusicTrack`] decides, frame by frame, which of its clips are
//! sounding, cross-fades between them, and reacts to host-supplied
//! conditions on musical bar boundaries. The [`engine::Engine`] owns the
//! tracks and mixes them into the host's output buffer.

pub mod clip;
pub mod config;
pub mod engine;
pub mod error;
pub mod mix;
pub mod random;
pub mod track;

pub use clip::{AudioClip, BufferClip, ClipFades, ClipId, ClipKind, ClipParams, Condition};
pub use clip::{ConditionType, MAIN_LOOP_CONDITION};
pub use engine::{Engine, EngineSettings};
pub use error::{ConfigError, EngineError, TrackError};
pub use mix::{MixFrame, MixOutput, SampleFormat};
pub use random::RandomSource;
pub use track::{MusicTrack, TrackFades};
