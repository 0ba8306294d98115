//! Date-derived note locations.
//!
//! # Responsibility
//! - Derive where "today's" note lives from a root directory and a date.
//! - Keep the full date string and its year/month/day parts consistent.
//!
//! # Invariants
//! - `year_month_directory == root_directory / year / month`.
//! - `note_file_path == year_month_directory / (full + ".md")`.
//! - Month is always the two-digit zero-padded form, in both the directory
//!   path and the editor goto path.
//! - Locations are computed fresh per invocation and never persisted.

use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// File extension used for every note file.
pub const NOTE_EXTENSION: &str = "md";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date rendered as `YYYY-MM-DD` plus its split components.
///
/// The parts are cut out of `full` rather than formatted separately, so the
/// directory names can never disagree with the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDate {
    /// Zero-padded `YYYY-MM-DD`.
    pub full: String,
    /// Four-digit year.
    pub year: String,
    /// Two-digit month.
    pub month: String,
    /// Two-digit day.
    pub day: String,
}

impl NoteDate {
    pub fn from_date(date: NaiveDate) -> Self {
        let full = date.format(DATE_FORMAT).to_string();
        let mut parts = full.splitn(3, '-');
        let year = parts.next().unwrap_or_default().to_string();
        let month = parts.next().unwrap_or_default().to_string();
        let day = parts.next().unwrap_or_default().to_string();
        Self {
            full,
            year,
            month,
            day,
        }
    }
}

/// Resolved set of paths for one day's note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesLocation {
    /// Configured top-level notes folder.
    pub root_directory: PathBuf,
    /// Calendar date the location was derived from.
    pub date: NaiveDate,
    /// Formatted date and its components.
    pub formatted: NoteDate,
    /// `<root>/<YYYY>/<MM>`.
    pub year_month_directory: PathBuf,
    /// `<root>/<YYYY>/<MM>/<YYYY-MM-DD>.md`.
    pub note_file_path: PathBuf,
    /// `<YYYY-MM-DD>.md`.
    pub note_file_name: String,
}

impl NotesLocation {
    /// Derives the note location for `date` under `root_directory`.
    ///
    /// Pure computation: no filesystem access, no error conditions.
    pub fn resolve(root_directory: impl Into<PathBuf>, date: NaiveDate) -> Self {
        let root_directory = root_directory.into();
        let formatted = NoteDate::from_date(date);
        let year_month_directory = root_directory
            .join(&formatted.year)
            .join(&formatted.month);
        let note_file_name = format!("{}.{NOTE_EXTENSION}", formatted.full);
        let note_file_path = year_month_directory.join(&note_file_name);

        Self {
            root_directory,
            date,
            formatted,
            year_month_directory,
            note_file_path,
            note_file_name,
        }
    }

    /// Derives the location for the current local calendar date.
    pub fn for_today(root_directory: impl Into<PathBuf>) -> Self {
        Self::resolve(root_directory, Local::now().date_naive())
    }

    /// Note path relative to the root, used as the editor jump target.
    pub fn goto_path(&self) -> PathBuf {
        Path::new(&self.formatted.year)
            .join(&self.formatted.month)
            .join(&self.note_file_name)
    }
}
