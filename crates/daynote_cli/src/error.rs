//! CLI error taxonomy and exit codes.

use crate::editor::LaunchError;
use daynote_core::{ConfigError, NoteServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Exit code for filesystem failures and a missing note on `open`.
pub const EXIT_IO: u8 = 1;
/// Exit code for invalid invocations; matches clap's own usage errors.
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;
pub const EXIT_LAUNCH: u8 = 4;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Note(NoteServiceError),
    Launch(LaunchError),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::Note(NoteServiceError::EmptyNote) => EXIT_USAGE,
            Self::Note(_) => EXIT_IO,
            Self::Launch(_) => EXIT_LAUNCH,
        }
    }

    /// Short category used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Note(NoteServiceError::EmptyNote) => "usage",
            Self::Note(NoteServiceError::NoteMissing(_)) => "note_missing",
            Self::Note(NoteServiceError::Store(_)) => "io",
            Self::Launch(_) => "launch",
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
            Self::Launch(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Note(err) => Some(err),
            Self::Launch(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<NoteServiceError> for CliError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

impl From<LaunchError> for CliError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}
