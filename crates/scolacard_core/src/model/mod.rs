//! Domain model for the card roster.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep wire-level JSON shapes stable for persisted blobs.
//!
//! # Invariants
//! - Every student is identified by a stable `StudentId`.
//! - Deletion is a hard removal from the roster, with no cascade
//!   beyond selection pruning.

pub mod school;
pub mod selection;
pub mod student;
