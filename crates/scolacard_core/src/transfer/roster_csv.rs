//! CSV parsing and template generation for roster import.
//!
//! # Responsibility
//! - Map CSV rows onto `Student` records through a header alias table.
//! - Write the downloadable import template.
//!
//! # Invariants
//! - Two header naming conventions are accepted per field (English
//!   camelCase and French short names); the first alias column with a
//!   non-empty cell wins.
//! - Missing columns and cells coerce to empty strings; only
//!   `schoolYear` falls back to a non-empty default.
//! - No de-duplication and no merge: parsed rows are appended as-is.

use crate::model::student::{Student, DEFAULT_SCHOOL_YEAR};
use csv::StringRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Suggested file name for the downloadable template.
pub const TEMPLATE_FILE_NAME: &str = "modele_import_eleves.csv";

/// Header row of the import template.
pub const TEMPLATE_HEADERS: [&str; 7] = [
    "lastName",
    "firstName",
    "matricule",
    "className",
    "schoolYear",
    "examCenter",
    "photoUrl",
];

const TEMPLATE_EXAMPLE_ROW: [&str; 7] = [
    "KOFFI",
    "Jean",
    "2024-TG-001",
    "Terminale C",
    "2025-2026",
    "Lycée de Tokoin",
    "",
];

/// Accepted header spellings per imported field, in priority order.
const FIRST_NAME_ALIASES: [&str; 2] = ["firstName", "prenom"];
const LAST_NAME_ALIASES: [&str; 2] = ["lastName", "nom"];
const MATRICULE_ALIASES: [&str; 1] = ["matricule"];
const CLASS_NAME_ALIASES: [&str; 2] = ["className", "classe"];
const SCHOOL_YEAR_ALIASES: [&str; 2] = ["schoolYear", "annee"];
const EXAM_CENTER_ALIASES: [&str; 2] = ["examCenter", "centre"];
const PHOTO_URL_ALIASES: [&str; 2] = ["photoUrl", "photo"];

/// Transfer error for CSV import/export operations.
#[derive(Debug)]
pub enum TransferError {
    /// CSV-level read/write failure (encoding, quoting, transport).
    Csv(csv::Error),
    /// File-system failure while opening/creating the transfer target.
    Io(std::io::Error),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<csv::Error> for TransferError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Parses CSV input into student records with freshly generated ids.
///
/// # Contract
/// - The first row is treated as the header row.
/// - Rows with fewer cells than headers are tolerated; missing cells
///   read as empty strings.
/// - Returns exactly one record per data row, in file order.
///
/// # Errors
/// Returns `TransferError::Csv` when a row cannot be decoded at all
/// (e.g. broken quoting or invalid UTF-8).
pub fn parse_students(input: impl Read) -> Result<Vec<Student>, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut students = Vec::new();

    for record in reader.records() {
        let record = record?;
        students.push(student_from_row(&headers, &record));
    }

    Ok(students)
}

/// Parses a CSV file from disk. See [`parse_students`].
pub fn parse_students_from_path(path: impl AsRef<Path>) -> Result<Vec<Student>, TransferError> {
    let file = File::open(path)?;
    parse_students(file)
}

/// Writes the import template (header row plus one example row).
pub fn write_template(output: impl Write) -> Result<(), TransferError> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(TEMPLATE_HEADERS)?;
    writer.write_record(TEMPLATE_EXAMPLE_ROW)?;
    writer.flush()?;
    Ok(())
}

/// Writes the import template to a file on disk.
pub fn write_template_to_path(path: impl AsRef<Path>) -> Result<(), TransferError> {
    let file = File::create(path)?;
    write_template(file)
}

/// Returns the import template as an in-memory CSV document.
pub fn template_csv() -> String {
    let mut buffer = Vec::new();
    // Writing rows of plain string literals into a Vec cannot fail.
    write_template(&mut buffer).expect("template serialization is infallible");
    String::from_utf8(buffer).expect("template is valid UTF-8")
}

fn student_from_row(headers: &StringRecord, record: &StringRecord) -> Student {
    let field = |aliases: &[&str]| -> String {
        for alias in aliases {
            if let Some(position) = headers.iter().position(|header| header == *alias) {
                if let Some(value) = record.get(position) {
                    if !value.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        String::new()
    };

    let school_year = {
        let value = field(&SCHOOL_YEAR_ALIASES);
        if value.is_empty() {
            DEFAULT_SCHOOL_YEAR.to_string()
        } else {
            value
        }
    };

    let mut student = Student::new(
        field(&FIRST_NAME_ALIASES),
        field(&LAST_NAME_ALIASES),
        field(&MATRICULE_ALIASES),
        field(&CLASS_NAME_ALIASES),
        school_year,
    );
    student.exam_center = non_empty(field(&EXAM_CENTER_ALIASES));
    student.photo_url = non_empty(field(&PHOTO_URL_ALIASES));
    student
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
