//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate storage-blob details from service/business orchestration.
//!
//! # Invariants
//! - Editor write paths enforce `Student::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`)
//!   in addition to DB transport errors.

pub mod roster_repo;
pub mod school_repo;
