//! Bulk roster transfer (CSV import/export).
//!
//! # Responsibility
//! - Parse uploaded CSV files into student records.
//! - Emit the import template staff fill in.
//!
//! # Invariants
//! - Import never mutates storage itself; services append the parsed
//!   batch through the repository.
//! - Every imported row receives a freshly generated student id.

pub mod roster_csv;
