//! Core domain logic for scolacard, a student ID card generator.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod print;
pub mod repo;
pub mod service;
pub mod transfer;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::school::SchoolInfo;
pub use model::selection::Selection;
pub use model::student::{Student, StudentId, StudentValidationError, DEFAULT_SCHOOL_YEAR};
pub use print::layout::{paginate, select_for_print, PageSlot, PrintConfig, PrintPage};
pub use repo::roster_repo::{
    RepoError, RepoResult, RosterQuery, RosterRepository, SqliteRosterRepository,
    STORAGE_KEY_STUDENTS,
};
pub use repo::school_repo::{SchoolRepository, SqliteSchoolRepository, STORAGE_KEY_SCHOOL};
pub use service::roster_service::{ImportError, RegisterStudentRequest, RosterService};
pub use service::school_service::SchoolService;
pub use transfer::roster_csv::{
    parse_students, parse_students_from_path, template_csv, write_template,
    write_template_to_path, TransferError, TEMPLATE_FILE_NAME, TEMPLATE_HEADERS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
