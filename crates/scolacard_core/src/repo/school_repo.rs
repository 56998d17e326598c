//! School configuration repository.
//!
//! # Responsibility
//! - Persist the singleton `SchoolInfo` blob next to the roster.
//!
//! # Invariants
//! - Exactly one configuration document exists per database, under a
//!   fixed storage key.
//! - A missing blob reads back as `SchoolInfo::default()`; the seed is
//!   only written once staff save an edit.

use crate::model::school::SchoolInfo;
use crate::repo::roster_repo::{
    ensure_connection_ready, read_storage_value, write_storage_value, RepoError, RepoResult,
};
use rusqlite::Connection;

/// Fixed storage key for the school configuration blob.
pub const STORAGE_KEY_SCHOOL: &str = "scolacard_school";

/// Repository interface for the school configuration singleton.
pub trait SchoolRepository {
    /// Loads the configuration, falling back to the seeded default.
    fn load_school_info(&self) -> RepoResult<SchoolInfo>;
    /// Replaces the stored configuration.
    fn save_school_info(&self, info: &SchoolInfo) -> RepoResult<()>;
}

/// SQLite-backed school configuration repository.
pub struct SqliteSchoolRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSchoolRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SchoolRepository for SqliteSchoolRepository<'_> {
    fn load_school_info(&self) -> RepoResult<SchoolInfo> {
        match read_storage_value(self.conn, STORAGE_KEY_SCHOOL)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                RepoError::InvalidData(format!("cannot decode `{STORAGE_KEY_SCHOOL}` blob: {err}"))
            }),
            None => Ok(SchoolInfo::default()),
        }
    }

    fn save_school_info(&self, info: &SchoolInfo) -> RepoResult<()> {
        let raw = serde_json::to_string(info).map_err(|err| {
            RepoError::InvalidData(format!("cannot encode `{STORAGE_KEY_SCHOOL}` blob: {err}"))
        })?;
        write_storage_value(self.conn, STORAGE_KEY_SCHOOL, &raw)
    }
}
