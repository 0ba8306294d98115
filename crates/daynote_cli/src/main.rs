//! `daynote` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and build the explicit configuration once.
//! - Resolve today's note location and dispatch to subcommand flows.
//! - Map failures to a one-line diagnostic and a non-zero exit code.

mod commands;
mod editor;
mod error;

use clap::{Parser, Subcommand};
use daynote_core::{init_logging, FsNoteStore, NoteService, NotesConfig, NotesLocation};
use editor::CommandTemplateLauncher;
use error::CliError;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "daynote",
    about = "A simple tool to jot down thoughts into one markdown file per day",
    version = daynote_core::core_version(),
)]
struct Cli {
    /// Config file (default is $HOME/.daynote.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Root notes directory, overriding config and environment
    #[arg(long, global = true)]
    notes_dir: Option<PathBuf>,
    /// Log level for the log file (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Adds a new note to today's note file
    Add {
        /// Note text; quote it to include spaces
        note: String,
    },
    /// Creates a note file for today and opens it
    Create,
    /// Opens the note file for today
    Open,
    /// Prints the path of today's note file
    Path,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Create => "create",
            Self::Open => "open",
            Self::Path => "path",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(
                "event=command module=cli status=error command={} error_code={} error={}",
                command_name,
                err.error_code(),
                err
            );
            eprintln!("daynote: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = NotesConfig::load(cli.config.as_deref())?;
    if let Some(notes_dir) = cli.notes_dir {
        config.notes_dir = notes_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Notes still get written when the log file cannot be opened.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("daynote: warning: logging disabled: {err}");
    }
    if let Some(path) = cli.config.as_deref() {
        info!(
            "event=config_load module=cli status=ok config_file={}",
            path.display()
        );
    }

    let location = NotesLocation::for_today(&config.notes_dir);
    let service = NoteService::new(FsNoteStore::new());
    info!(
        "event=command module=cli status=start command={} date={}",
        cli.command.name(),
        location.formatted.full
    );

    match cli.command {
        Commands::Add { note } => {
            commands::run_add(&service, &location, &note)?;
        }
        Commands::Create => {
            let launcher = CommandTemplateLauncher::new(&config.open_command);
            commands::run_create(&service, &location, &launcher)?;
        }
        Commands::Open => {
            let launcher = CommandTemplateLauncher::new(&config.open_command);
            commands::run_open(&service, &location, &launcher)?;
        }
        Commands::Path => commands::run_path(&location),
    }

    Ok(())
}
