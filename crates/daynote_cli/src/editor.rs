//! Editor launching for `create` and `open`.
//!
//! # Responsibility
//! - Turn the configured open command template into a child process.
//! - Report launch failures without waiting for the editor to exit.
//!
//! # Invariants
//! - Placeholders are substituted per argument, so paths containing spaces
//!   stay a single argv entry.
//! - The child runs detached from our stdio; its output is not captured.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::process::{Command, Stdio};

const DIR_PLACEHOLDER: &str = "{dir}";
const GOTO_PLACEHOLDER: &str = "{goto}";
const FILE_PLACEHOLDER: &str = "{file}";

/// Editor launch errors.
#[derive(Debug)]
pub enum LaunchError {
    /// Open command template has no program.
    EmptyTemplate,
    /// Spawning the editor process failed.
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTemplate => write!(f, "open command is empty"),
            Self::Spawn { program, source } => {
                write!(f, "failed while starting `{program}`: {source}")
            }
        }
    }
}

impl Error for LaunchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::EmptyTemplate => None,
        }
    }
}

/// Opens a note in an external editor.
pub trait EditorLauncher {
    /// Launches the editor on `target_directory`, jumping to `goto_path`
    /// (relative to `target_directory`).
    fn launch_editor(&self, target_directory: &Path, goto_path: &Path) -> Result<(), LaunchError>;
}

/// Launcher driven by a whitespace-separated command template such as
/// `code {dir} --goto {goto}` or `vim {file}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplateLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandTemplateLauncher {
    /// Splits `template` into argv entries.
    ///
    /// A blank template is accepted here and reported by `launch_editor`,
    /// so note creation never depends on the editor being configured.
    pub fn new(template: &str) -> Self {
        let mut parts = template.split_whitespace().map(str::to_string);
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        }
    }

    /// Program plus arguments with placeholders filled in.
    pub fn render(
        &self,
        target_directory: &Path,
        goto_path: &Path,
    ) -> Result<(String, Vec<String>), LaunchError> {
        if self.program.is_empty() {
            return Err(LaunchError::EmptyTemplate);
        }
        let dir = target_directory.display().to_string();
        let goto = goto_path.display().to_string();
        let file = target_directory.join(goto_path).display().to_string();
        let fill = |value: &str| {
            value
                .replace(DIR_PLACEHOLDER, &dir)
                .replace(GOTO_PLACEHOLDER, &goto)
                .replace(FILE_PLACEHOLDER, &file)
        };
        Ok((fill(&self.program), self.args.iter().map(|arg| fill(arg)).collect()))
    }
}

impl EditorLauncher for CommandTemplateLauncher {
    fn launch_editor(&self, target_directory: &Path, goto_path: &Path) -> Result<(), LaunchError> {
        let (program, args) = self.render(target_directory, goto_path)?;
        Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;
        info!(
            "event=editor_launch module=cli status=ok program={} goto={}",
            program,
            goto_path.display()
        );
        Ok(())
    }
}
