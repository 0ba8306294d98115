//! Derived domain values for daily notes.
//!
//! # Invariants
//! - Nothing in this module touches the filesystem or the clock except
//!   `NotesLocation::for_today`, which reads the local date.

pub mod location;
