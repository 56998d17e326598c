//! School configuration use-case service.
//!
//! # Responsibility
//! - Provide read/replace entry points for the configuration singleton.
//!
//! # Invariants
//! - Reads fall back to the seeded default configuration.
//! - Edits replace the whole document in place.

use crate::model::school::SchoolInfo;
use crate::repo::roster_repo::RepoResult;
use crate::repo::school_repo::SchoolRepository;

/// Use-case service wrapper for the school configuration.
pub struct SchoolService<R: SchoolRepository> {
    repo: R,
}

impl<R: SchoolRepository> SchoolService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Loads the current configuration (default when never saved).
    pub fn school_info(&self) -> RepoResult<SchoolInfo> {
        self.repo.load_school_info()
    }

    /// Replaces the configuration document.
    pub fn update_school_info(&self, info: &SchoolInfo) -> RepoResult<()> {
        self.repo.save_school_info(info)
    }
}
