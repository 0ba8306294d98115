//! Core logic for daynote: daily markdown notes in a year/month tree.
//! The CLI crate only parses arguments and launches editors on top of this.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, FileConfig, NotesConfig};
pub use logging::{default_log_level, init_logging};
pub use model::location::{NoteDate, NotesLocation, NOTE_EXTENSION};
pub use service::note_service::{AddOutcome, EnsureOutcome, NoteService, NoteServiceError};
pub use store::note_store::{FsNoteStore, NoteStore, StoreError, StoreOp, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
