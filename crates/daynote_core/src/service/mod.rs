//! Note use-case services.
//!
//! # Responsibility
//! - Compose store primitives into add/create/open flows.
//! - Keep the CLI decoupled from filesystem details.

pub mod note_service;
