//! Subcommand flows.
//!
//! Each flow takes today's resolved location and the collaborators it needs,
//! so tests can drive them with a temporary root and a fake launcher.

use crate::editor::EditorLauncher;
use crate::error::CliError;
use daynote_core::{AddOutcome, EnsureOutcome, NoteService, NoteStore, NotesLocation};
use log::{error, info};

/// `add <note>`: appends one entry, creating today's note when needed.
pub fn run_add<S: NoteStore>(
    service: &NoteService<S>,
    location: &NotesLocation,
    note: &str,
) -> Result<AddOutcome, CliError> {
    let outcome = service.add_note(location, note)?;
    if outcome == AddOutcome::Created {
        println!("Created new note file at {}", location.note_file_path.display());
    }
    Ok(outcome)
}

/// `create`: ensures today's note exists, then opens it.
///
/// A failed launch is reported, but a freshly created note is kept.
pub fn run_create<S: NoteStore>(
    service: &NoteService<S>,
    location: &NotesLocation,
    launcher: &dyn EditorLauncher,
) -> Result<EnsureOutcome, CliError> {
    let outcome = service.ensure_note(location)?;
    if outcome == EnsureOutcome::Created {
        println!("Created new note file at {}", location.note_file_path.display());
    }
    launch(location, launcher)?;
    Ok(outcome)
}

/// `open`: opens today's note; never creates it.
pub fn run_open<S: NoteStore>(
    service: &NoteService<S>,
    location: &NotesLocation,
    launcher: &dyn EditorLauncher,
) -> Result<(), CliError> {
    service.existing_note(location)?;
    launch(location, launcher)
}

/// `path`: prints today's note path without touching the filesystem.
pub fn run_path(location: &NotesLocation) {
    println!("{}", location.note_file_path.display());
}

fn launch(location: &NotesLocation, launcher: &dyn EditorLauncher) -> Result<(), CliError> {
    match launcher.launch_editor(&location.root_directory, &location.goto_path()) {
        Ok(()) => {
            info!(
                "event=note_open module=cli status=ok path={}",
                location.note_file_path.display()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=note_open module=cli status=error error_code=launch_failed error={}",
                err
            );
            Err(err.into())
        }
    }
}
