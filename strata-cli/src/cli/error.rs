use std::fmt::{Display, Formatter};

use strata_lib::{ConfigError, EngineError};

/// Error type for CLI commands.
#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Engine(EngineError),
    Wav(hound::Error),
    Json(serde_json::Error),
    InvalidArgument(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::Engine(err) => write!(f, "{}", err),
            Self::Wav(err) => write!(f, "wav error: {}", err),
            Self::Json(err) => write!(f, "json error: {}", err),
            Self::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Engine(err) => Some(err),
            Self::Wav(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<EngineError> for CliError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<hound::Error> for CliError {
    fn from(value: hound::Error) -> Self {
        Self::Wav(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
