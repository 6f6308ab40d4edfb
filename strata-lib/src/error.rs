//! Error types for track, engine and project configuration operations.

use std::fmt::{Display, Formatter};

/// Error returned by mutating track operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// The track is mixing; the call was rejected and no state changed.
    Locked { track: String },
}

impl Display for TrackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked { track } => write!(f, "track {} is locked by an in-flight mix", track),
        }
    }
}

impl std::error::Error for TrackError {}

/// Error returned at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    UnknownTrack(String),
    DuplicateTrack(String),
    Locked(String),
    InvalidFormat(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTrack(name) => write!(f, "unknown track: {}", name),
            Self::DuplicateTrack(name) => write!(f, "track already exists: {}", name),
            Self::Locked(name) => write!(f, "track {} is locked by an in-flight mix", name),
            Self::InvalidFormat(reason) => write!(f, "invalid audio format: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<TrackError> for EngineError {
    fn from(value: TrackError) -> Self {
        match value {
            TrackError::Locked { track } => Self::Locked(track),
        }
    }
}

/// Error type for loading a project definition and building an engine.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidClip {
        track: String,
        clip: String,
        reason: String,
    },
    Load {
        source: String,
        reason: String,
    },
    Engine(EngineError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Json(err) => write!(f, "invalid project json: {}", err),
            Self::InvalidClip {
                track,
                clip,
                reason,
            } => write!(f, "invalid clip {} in track {}: {}", clip, track, reason),
            Self::Load { source, reason } => write!(f, "failed to load {}: {}", source, reason),
            Self::Engine(err) => write!(f, "engine error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<EngineError> for ConfigError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
