//! Roster repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the persisted student collection.
//! - Keep storage-blob details inside the core persistence boundary.
//!
//! # Invariants
//! - The whole roster is one JSON document under a fixed storage key;
//!   every mutation rewrites it.
//! - Student ids are unique within the stored collection.
//! - Editor write paths call `Student::validate()` before persistence;
//!   bulk append (CSV import) is tolerant and skips field validation.
//! - Read paths reject undecodable persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::student::{Student, StudentId, StudentValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the student collection blob.
pub const STORAGE_KEY_STUDENTS: &str = "scolacard_students";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for roster persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    NotFound(StudentId),
    /// Create/append would introduce a second record with the same id.
    DuplicateId(StudentId),
    InvalidData(String),
    /// The connection was opened without running migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate student id: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table missing: {table}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing roster entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    /// Case-insensitive substring match over first name, last name and
    /// matricule. `None` or blank lists everyone.
    pub search: Option<String>,
}

/// Repository interface for roster CRUD operations.
pub trait RosterRepository {
    /// Persists one new student and returns its stable id.
    fn create_student(&self, student: &Student) -> RepoResult<StudentId>;
    /// Replaces the stored record with the same id, field for field.
    fn update_student(&self, student: &Student) -> RepoResult<()>;
    /// Gets one student by id.
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Lists students in insertion order, optionally filtered.
    fn list_students(&self, query: &RosterQuery) -> RepoResult<Vec<Student>>;
    /// Hard-deletes one student by id.
    fn delete_student(&self, id: StudentId) -> RepoResult<()>;
    /// Appends a batch of imported students without field validation.
    ///
    /// Returns the number of appended records.
    fn append_students(&self, students: &[Student]) -> RepoResult<usize>;
    /// Returns the stored roster size.
    fn count_students(&self) -> RepoResult<usize>;
}

/// SQLite-backed roster repository over the `storage` blob table.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not run.
    /// - `MissingRequiredTable` when the storage table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn load_roster(&self) -> RepoResult<Vec<Student>> {
        match read_storage_value(self.conn, STORAGE_KEY_STUDENTS)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                RepoError::InvalidData(format!(
                    "cannot decode `{STORAGE_KEY_STUDENTS}` blob: {err}"
                ))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_roster(&self, roster: &[Student]) -> RepoResult<()> {
        let raw = serde_json::to_string(roster).map_err(|err| {
            RepoError::InvalidData(format!("cannot encode `{STORAGE_KEY_STUDENTS}` blob: {err}"))
        })?;
        write_storage_value(self.conn, STORAGE_KEY_STUDENTS, &raw)
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        student.validate()?;

        let mut roster = self.load_roster()?;
        if roster.iter().any(|existing| existing.id == student.id) {
            return Err(RepoError::DuplicateId(student.id));
        }
        roster.push(student.clone());
        self.save_roster(&roster)?;

        Ok(student.id)
    }

    fn update_student(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let mut roster = self.load_roster()?;
        let slot = roster
            .iter_mut()
            .find(|existing| existing.id == student.id)
            .ok_or(RepoError::NotFound(student.id))?;
        *slot = student.clone();
        self.save_roster(&roster)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let roster = self.load_roster()?;
        Ok(roster.into_iter().find(|student| student.id == id))
    }

    fn list_students(&self, query: &RosterQuery) -> RepoResult<Vec<Student>> {
        let roster = self.load_roster()?;
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        match needle {
            Some(needle) => Ok(roster
                .into_iter()
                .filter(|student| student.search_haystack().contains(&needle))
                .collect()),
            None => Ok(roster),
        }
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<()> {
        let mut roster = self.load_roster()?;
        let before = roster.len();
        roster.retain(|student| student.id != id);
        if roster.len() == before {
            return Err(RepoError::NotFound(id));
        }
        self.save_roster(&roster)
    }

    fn append_students(&self, students: &[Student]) -> RepoResult<usize> {
        if students.is_empty() {
            return Ok(0);
        }

        let mut roster = self.load_roster()?;
        for incoming in students {
            if incoming.id.is_nil() {
                return Err(RepoError::Validation(StudentValidationError::NilId));
            }
            if roster.iter().any(|existing| existing.id == incoming.id) {
                return Err(RepoError::DuplicateId(incoming.id));
            }
            roster.push(incoming.clone());
        }
        self.save_roster(&roster)?;

        Ok(students.len())
    }

    fn count_students(&self) -> RepoResult<usize> {
        Ok(self.load_roster()?.len())
    }
}

/// Rejects connections that skipped migration bootstrap.
pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_present = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'storage';",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !table_present {
        return Err(RepoError::MissingRequiredTable("storage"));
    }

    Ok(())
}

pub(crate) fn read_storage_value(conn: &Connection, key: &str) -> RepoResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM storage WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

pub(crate) fn write_storage_value(conn: &Connection, key: &str, value: &str) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO storage (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![key, value],
    )?;
    Ok(())
}
