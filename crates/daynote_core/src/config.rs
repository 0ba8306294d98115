//! Explicit runtime configuration.
//!
//! # Responsibility
//! - Build one `NotesConfig` value at process start from defaults, an
//!   optional TOML file and `DAYNOTE_*` environment variables.
//! - Keep resolution testable without touching the process environment.
//!
//! # Invariants
//! - Precedence, lowest to highest: defaults, config file, environment.
//! - A relative `notes_dir` is anchored under `<home>/Documents`.
//! - A missing default config file is not an error; a missing explicitly
//!   requested file is.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Application folder name used for default paths.
pub const APP_DIR_NAME: &str = "daynote";
/// Config file name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".daynote.toml";
/// Default editor command template.
pub const DEFAULT_OPEN_COMMAND: &str = "code {dir} --goto {goto}";

pub const ENV_NOTES_DIR: &str = "DAYNOTE_NOTES_DIR";
pub const ENV_OPEN_COMMAND: &str = "DAYNOTE_OPEN_COMMAND";
pub const ENV_LOG_LEVEL: &str = "DAYNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "DAYNOTE_LOG_DIR";

const DOCUMENTS_DIR_NAME: &str = "Documents";

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    HomeDirUnavailable,
    /// An explicitly requested config file does not exist.
    MissingFile(PathBuf),
    /// Config file exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected keys.
    Parse { path: PathBuf, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(f, "could not determine home directory"),
            Self::MissingFile(path) => {
                write!(f, "config file `{}` does not exist", path.display())
            }
            Self::Read { path, source } => {
                write!(f, "failed to read config file `{}`: {source}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config file `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw keys accepted in the TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub notes_dir: Option<String>,
    pub open_command: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl FileConfig {
    /// Parses TOML text; `path` is only used for diagnostics.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }
}

/// Fully resolved configuration passed to note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Root directory holding `<YYYY>/<MM>/<YYYY-MM-DD>.md` notes.
    pub notes_dir: PathBuf,
    /// Editor command template (`{dir}`, `{goto}`, `{file}` placeholders).
    pub open_command: String,
    /// Log level for file logging.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
}

impl NotesConfig {
    /// Loads configuration for the current user.
    ///
    /// `explicit_file` selects a config file instead of
    /// `<home>/.daynote.toml`.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        let file_config = match explicit_file {
            Some(path) => Some(read_file_config(path)?.ok_or_else(|| {
                ConfigError::MissingFile(path.to_path_buf())
            })?),
            None => read_file_config(&home.join(DEFAULT_CONFIG_FILE_NAME))?,
        };
        let data_local_dir = dirs::data_local_dir();

        Ok(Self::resolve(
            &home,
            data_local_dir.as_deref(),
            file_config.unwrap_or_default(),
            |key| std::env::var(key).ok(),
        ))
    }

    /// Applies environment overrides on top of file values and defaults.
    pub fn resolve(
        home: &Path,
        data_local_dir: Option<&Path>,
        file_config: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |key: &str, file_value: Option<String>| {
            env(key)
                .filter(|value| !value.trim().is_empty())
                .or(file_value)
        };

        let notes_dir = pick(ENV_NOTES_DIR, file_config.notes_dir)
            .map(|value| resolve_notes_dir(home, &value))
            .unwrap_or_else(|| home.join(DOCUMENTS_DIR_NAME).join(APP_DIR_NAME));
        let open_command = pick(ENV_OPEN_COMMAND, file_config.open_command)
            .unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string());
        let log_level = pick(ENV_LOG_LEVEL, file_config.log_level)
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = pick(ENV_LOG_DIR, file_config.log_dir)
            .map(|value| expand_home(home, &value))
            .unwrap_or_else(|| default_log_dir(home, data_local_dir));

        Self {
            notes_dir,
            open_command,
            log_level,
            log_dir,
        }
    }
}

fn read_file_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => FileConfig::parse(&text, path).map(Some),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Expands `~` and anchors relative notes directories under `Documents`.
fn resolve_notes_dir(home: &Path, value: &str) -> PathBuf {
    let expanded = expand_home(home, value);
    if expanded.is_absolute() {
        expanded
    } else {
        home.join(DOCUMENTS_DIR_NAME).join(expanded)
    }
}

fn expand_home(home: &Path, value: &str) -> PathBuf {
    let trimmed = value.trim();
    if trimmed == "~" {
        return home.to_path_buf();
    }
    match trimmed.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(trimmed),
    }
}

fn default_log_dir(home: &Path, data_local_dir: Option<&Path>) -> PathBuf {
    match data_local_dir {
        Some(dir) => dir.join(APP_DIR_NAME).join("logs"),
        None => home.join(format!(".{APP_DIR_NAME}")).join("logs"),
    }
}
