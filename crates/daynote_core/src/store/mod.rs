//! Filesystem primitives backing note operations.
//!
//! # Responsibility
//! - Define the small set of storage operations note use-cases rely on.
//! - Isolate `std::fs` details from service orchestration.
//!
//! # Invariants
//! - Every operation is a blocking call against the real filesystem.
//! - Store errors carry the failed operation and the path involved.

pub mod note_store;
