//! Roster use-case service.
//!
//! # Responsibility
//! - Provide stable register/update/delete/list entry points.
//! - Orchestrate CSV import parsing with bulk append.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Deleting a student also prunes it from the caller's selection.
//! - Service layer remains storage-agnostic.

use crate::model::selection::Selection;
use crate::model::student::{Student, StudentId};
use crate::repo::roster_repo::{RepoError, RepoResult, RosterQuery, RosterRepository};
use crate::transfer::roster_csv::{parse_students, TransferError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;

/// Request model for registering one student through the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub matricule: String,
    pub class_name: String,
    pub school_year: String,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub exam_center: Option<String>,
    pub photo_url: Option<String>,
    pub qr_code_data: Option<String>,
}

/// Service error for CSV import use-cases.
#[derive(Debug)]
pub enum ImportError {
    /// The file could not be read or decoded as CSV.
    Transfer(TransferError),
    /// The parsed batch could not be appended.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transfer(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TransferError> for ImportError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for roster operations.
pub struct RosterService<R: RosterRepository> {
    repo: R,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new student from editor input.
    ///
    /// # Contract
    /// - Assigns a freshly generated stable id.
    /// - Required-field validation runs before persistence.
    /// - Returns the created stable student id.
    pub fn register_student(&self, request: &RegisterStudentRequest) -> RepoResult<StudentId> {
        let mut student = Student::new(
            request.first_name.clone(),
            request.last_name.clone(),
            request.matricule.clone(),
            request.class_name.clone(),
            request.school_year.clone(),
        );
        student.birth_date = request.birth_date.clone();
        student.birth_place = request.birth_place.clone();
        student.exam_center = request.exam_center.clone();
        student.photo_url = request.photo_url.clone();
        student.qr_code_data = request.qr_code_data.clone();

        let id = self.repo.create_student(&student)?;
        info!("event=student_registered module=service status=ok student_id={id}");
        Ok(id)
    }

    /// Replaces an existing student record by stable id.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_student(&self, student: &Student) -> RepoResult<()> {
        self.repo.update_student(student)
    }

    /// Gets one student by id.
    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_student(id)
    }

    /// Lists roster entries using the optional search filter.
    pub fn list_students(&self, query: &RosterQuery) -> RepoResult<Vec<Student>> {
        self.repo.list_students(query)
    }

    /// Deletes one student and prunes it from the selection.
    ///
    /// # Contract
    /// - Hard delete; the record leaves the stored collection.
    /// - The id leaves `selection` even if it was not selected (no-op).
    pub fn delete_student(&self, id: StudentId, selection: &mut Selection) -> RepoResult<()> {
        self.repo.delete_student(id)?;
        selection.remove(id);
        info!("event=student_deleted module=service status=ok student_id={id}");
        Ok(())
    }

    /// Imports students from CSV input and appends them to the roster.
    ///
    /// # Contract
    /// - Every imported row gets a freshly generated id.
    /// - N decodable rows append exactly N records; no de-duplication.
    /// - Returns the number of imported students.
    pub fn import_csv(&self, input: impl Read) -> Result<usize, ImportError> {
        let students = parse_students(input)?;
        let appended = self.repo.append_students(&students)?;
        info!("event=roster_imported module=service status=ok count={appended}");
        Ok(appended)
    }

    /// Returns the stored roster size.
    pub fn count_students(&self) -> RepoResult<usize> {
        self.repo.count_students()
    }
}
