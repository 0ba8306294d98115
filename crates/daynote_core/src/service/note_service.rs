//! Daily note use-case service.
//!
//! # Responsibility
//! - Add a list entry to today's note, creating the note on first use.
//! - Ensure today's note exists for editing, or locate it for opening.
//! - Compose heading and entry text for the markdown note format.
//!
//! # Invariants
//! - Existing note content is never rewritten; new entries are appended.
//! - Exactly one blank line separates an appended entry from prior content.
//! - The containing year/month directory is ensured before any file write.
//! - Check-then-act (exists, then create or append) is not atomic; two
//!   concurrent writers on the same day may interleave.

use crate::model::location::NotesLocation;
use crate::store::note_store::{NoteStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

const ENTRY_PREFIX: &str = "- ";

/// Service error for daily note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Note text is empty or whitespace only.
    EmptyNote,
    /// Today's note file does not exist and the caller must not create it.
    NoteMissing(PathBuf),
    /// Filesystem failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "note text must not be empty"),
            Self::NoteMissing(path) => write!(f, "no note exists at `{}`", path.display()),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Terminal state of an add-note call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Note file did not exist; it was created with the heading and entry.
    Created,
    /// Entry was appended to an existing note file.
    Appended,
}

/// Result of ensuring today's note file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    Existing,
}

/// Note service facade over a store implementation.
pub struct NoteService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> NoteService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds `note` as a list entry to the note at `location`.
    ///
    /// Creates the year/month directory and the note file when absent.
    ///
    /// # Errors
    /// - `EmptyNote` when `note` is blank; nothing is touched on disk.
    /// - `Store` when any filesystem step fails. A directory created before
    ///   the failure is left behind.
    pub fn add_note(
        &self,
        location: &NotesLocation,
        note: &str,
    ) -> Result<AddOutcome, NoteServiceError> {
        if note.trim().is_empty() {
            return Err(NoteServiceError::EmptyNote);
        }

        self.store.ensure_directory(&location.year_month_directory)?;

        let path = &location.note_file_path;
        if !self.store.path_exists(path)? {
            let content = initial_note_content(&location.formatted.full, note);
            self.store.create_file(path, &content)?;
            info!(
                "event=note_add module=service status=created note_chars={} path={}",
                note.chars().count(),
                path.display()
            );
            return Ok(AddOutcome::Created);
        }

        let trailing = self.store.trailing_lines_of(path, 2)?;
        let content = appended_entry(&trailing, note);
        self.store.append_to_file(path, &content)?;
        info!(
            "event=note_add module=service status=appended note_chars={} path={}",
            note.chars().count(),
            path.display()
        );
        Ok(AddOutcome::Appended)
    }

    /// Ensures the note at `location` exists, writing only the heading when
    /// it has to be created.
    pub fn ensure_note(&self, location: &NotesLocation) -> Result<EnsureOutcome, NoteServiceError> {
        self.store.ensure_directory(&location.year_month_directory)?;

        let path = &location.note_file_path;
        if self.store.path_exists(path)? {
            return Ok(EnsureOutcome::Existing);
        }

        self.store
            .create_file(path, &note_heading(&location.formatted.full))?;
        info!(
            "event=note_create module=service status=created path={}",
            path.display()
        );
        Ok(EnsureOutcome::Created)
    }

    /// Returns the note path at `location` when the file already exists.
    ///
    /// Never creates directories or files.
    pub fn existing_note(&self, location: &NotesLocation) -> Result<PathBuf, NoteServiceError> {
        let path = &location.note_file_path;
        if self.store.path_exists(path)? {
            Ok(path.clone())
        } else {
            Err(NoteServiceError::NoteMissing(path.clone()))
        }
    }
}

/// Level-1 heading naming the day, without a trailing newline.
pub fn note_heading(date_full: &str) -> String {
    format!("# {date_full}")
}

/// Content of a note file created by adding its first entry.
///
/// `# <date>\n\n- <note>`, no trailing newline.
pub fn initial_note_content(date_full: &str, note: &str) -> String {
    format!("{}\n\n{ENTRY_PREFIX}{note}", note_heading(date_full))
}

/// Prefix that leaves exactly one blank line before the next entry.
///
/// `trailing` is the tail of the file split on `\n` (at most two elements
/// are inspected, last element last).
///
/// A newline-terminated entry still gets `"\n"` (`"- a\n"` + `b` gives
/// `"- a\n\n- b\n"`). Looking only at whether the file ends in `\n` would
/// glue the third entry of a day to the second; entries stay separated by
/// blank lines instead.
pub fn entry_separator(trailing: &[String]) -> &'static str {
    match trailing {
        [.., last] if !last.is_empty() => "\n\n",
        [.., previous, _] if !previous.is_empty() => "\n",
        _ => "",
    }
}

/// Text appended to an existing note for `note`.
pub fn appended_entry(trailing: &[String], note: &str) -> String {
    format!("{}{ENTRY_PREFIX}{note}\n", entry_separator(trailing))
}

#[cfg(test)]
mod tests {
    use super::{appended_entry, entry_separator, initial_note_content, note_heading};

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn initial_content_has_heading_blank_line_and_entry() {
        assert_eq!(
            initial_note_content("2024-03-05", "buy milk"),
            "# 2024-03-05\n\n- buy milk"
        );
        assert_eq!(note_heading("2024-03-05"), "# 2024-03-05");
    }

    #[test]
    fn separator_terminates_unfinished_line_and_adds_blank_line() {
        assert_eq!(entry_separator(&lines(&["", "- buy milk"])), "\n\n");
        assert_eq!(entry_separator(&lines(&["# 2024-03-05"])), "\n\n");
    }

    #[test]
    fn separator_adds_only_blank_line_after_terminated_entry() {
        assert_eq!(entry_separator(&lines(&["- call mom", ""])), "\n");
    }

    #[test]
    fn separator_is_empty_when_file_already_ends_in_blank_line() {
        assert_eq!(entry_separator(&lines(&["", ""])), "");
        assert_eq!(entry_separator(&lines(&[""])), "");
    }

    #[test]
    fn appended_entry_ends_with_newline() {
        assert_eq!(
            appended_entry(&lines(&["", "- buy milk"]), "call mom"),
            "\n\n- call mom\n"
        );
    }
}
