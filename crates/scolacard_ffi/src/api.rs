//! FFI use-case API for the UI shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI via FRB.
//! - Keep error semantics simple for UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are UTF-8 strings or envelope structs with stable
//!   meaning.
//! - The print selection lives in this layer only; it is process state,
//!   never persisted.

use scolacard_core::db::open_db;
use scolacard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, paginate,
    parse_students_from_path, ping as ping_inner, select_for_print, write_template_to_path,
    PrintConfig, RegisterStudentRequest, RosterQuery, RosterRepository, RosterService, SchoolInfo,
    SchoolService, Selection, SqliteRosterRepository, SqliteSchoolRepository, Student, StudentId,
    TEMPLATE_FILE_NAME,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const ROSTER_DB_FILE_NAME: &str = "scolacard_roster.sqlite3";
static ROSTER_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SELECTION: OnceLock<Mutex<Selection>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Student fields crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentView {
    /// Stable student id in string form.
    pub id: String,
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
    /// Payload the card's QR code should encode.
    pub qr_payload: String,
    /// Whether this student is currently marked for printing.
    pub selected: bool,
}

/// Generic action response envelope for roster commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional affected student ID.
    pub student_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl RosterActionResponse {
    fn success(message: impl Into<String>, student_id: String) -> Self {
        Self {
            ok: true,
            student_id: Some(student_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            student_id: None,
            message: message.into(),
        }
    }
}

/// Roster list response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterListResponse {
    /// Matching students in insertion order (empty on failure).
    pub items: Vec<StudentView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
    /// Stored roster size before filtering.
    pub total: u32,
}

/// Import response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    /// Number of appended students.
    pub imported: u32,
    pub message: String,
}

/// School configuration crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolInfoView {
    pub name: String,
    pub logo_url: Option<String>,
    pub signature_url: Option<String>,
    pub stamp_url: Option<String>,
}

/// One print page: ids of the cards plus trailing placeholder slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPageView {
    /// Student ids in grid order.
    pub student_ids: Vec<String>,
    /// Invisible filler slots completing the grid.
    pub placeholder_count: u32,
}

/// Print layout response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintLayoutResponse {
    pub ok: bool,
    pub pages: Vec<PrintPageView>,
    /// Card slot width in millimeters.
    pub card_width_mm: f64,
    /// Card slot height in millimeters.
    pub card_height_mm: f64,
    pub message: String,
}

/// Registers a new student from editor input.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created student ID on success.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn register_student(
    first_name: String,
    last_name: String,
    matricule: String,
    class_name: String,
    school_year: String,
    birth_date: Option<String>,
    birth_place: Option<String>,
    exam_center: Option<String>,
    photo_url: Option<String>,
    qr_code_data: Option<String>,
) -> RosterActionResponse {
    let request = RegisterStudentRequest {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        matricule: matricule.trim().to_string(),
        class_name: class_name.trim().to_string(),
        school_year: school_year.trim().to_string(),
        birth_date,
        birth_place,
        exam_center,
        photo_url,
        qr_code_data,
    };
    match with_roster_service(|service| service.register_student(&request)) {
        Ok(id) => RosterActionResponse::success("Student registered.", id.to_string()),
        Err(err) => RosterActionResponse::failure(format!("register_student failed: {err}")),
    }
}

/// Replaces an existing student record by stable id.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Keeps the id; replaces every other field.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn update_student(
    id: String,
    first_name: String,
    last_name: String,
    matricule: String,
    class_name: String,
    school_year: String,
    birth_date: Option<String>,
    birth_place: Option<String>,
    exam_center: Option<String>,
    photo_url: Option<String>,
    qr_code_data: Option<String>,
) -> RosterActionResponse {
    let student_id = match parse_student_id(&id) {
        Ok(student_id) => student_id,
        Err(message) => return RosterActionResponse::failure(message),
    };
    let student = match Student::with_id(
        student_id,
        first_name.trim().to_string(),
        last_name.trim().to_string(),
        matricule.trim().to_string(),
        class_name.trim().to_string(),
        school_year.trim().to_string(),
    ) {
        Ok(mut student) => {
            student.birth_date = birth_date;
            student.birth_place = birth_place;
            student.exam_center = exam_center;
            student.photo_url = photo_url;
            student.qr_code_data = qr_code_data;
            student
        }
        Err(err) => return RosterActionResponse::failure(format!("update_student failed: {err}")),
    };

    match with_roster_service(|service| service.update_student(&student)) {
        Ok(()) => RosterActionResponse::success("Student updated.", id),
        Err(err) => RosterActionResponse::failure(format!("update_student failed: {err}")),
    }
}

/// Deletes one student by stable id.
///
/// The caller is expected to have confirmed the destructive action;
/// deletion also removes the id from the print selection.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_student(id: String) -> RosterActionResponse {
    let student_id = match parse_student_id(&id) {
        Ok(student_id) => student_id,
        Err(message) => return RosterActionResponse::failure(message),
    };

    let result = with_roster_service(|service| {
        let mut selection = lock_selection();
        service.delete_student(student_id, &mut selection)
    });
    match result {
        Ok(()) => RosterActionResponse::success("Student deleted.", id),
        Err(err) => RosterActionResponse::failure(format!("delete_student failed: {err}")),
    }
}

/// Lists roster entries with the optional search filter.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns insertion-ordered items and the unfiltered total.
#[flutter_rust_bridge::frb(sync)]
pub fn list_students(search: Option<String>) -> RosterListResponse {
    let query = RosterQuery { search };
    let result = with_roster_service(|service| {
        let items = service.list_students(&query)?;
        let total = service.count_students()?;
        Ok((items, total))
    });
    match result {
        Ok((items, total)) => {
            let selection = lock_selection();
            let items = items
                .into_iter()
                .map(|student| to_student_view(student, &selection))
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No students found.".to_string()
            } else {
                format!("Found {} student(s).", items.len())
            };
            RosterListResponse {
                items,
                message,
                total: total as u32,
            }
        }
        Err(err) => RosterListResponse {
            items: Vec::new(),
            message: format!("list_students failed: {err}"),
            total: 0,
        },
    }
}

/// Flips print-selection membership for one student id.
///
/// # FFI contract
/// - Sync call, selection state only (no DB access).
/// - Never panics.
/// - Returns whether the id is selected after the call.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_selected(id: String) -> bool {
    match parse_student_id(&id) {
        Ok(student_id) => lock_selection().toggle(student_id),
        Err(_) => false,
    }
}

/// Clears the print selection.
///
/// # FFI contract
/// - Sync call, selection state only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn clear_selection() {
    lock_selection().clear();
}

/// Returns the number of selected students.
#[flutter_rust_bridge::frb(sync)]
pub fn selected_count() -> u32 {
    lock_selection().len() as u32
}

/// Imports students from a CSV file on disk.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - N decodable rows append exactly N students with fresh ids.
#[flutter_rust_bridge::frb(sync)]
pub fn import_roster_csv(path: String) -> ImportResponse {
    let students = match parse_students_from_path(&path) {
        Ok(students) => students,
        Err(err) => {
            return ImportResponse {
                ok: false,
                imported: 0,
                message: format!("import_roster_csv failed: {err}"),
            };
        }
    };

    match with_roster_repo(|repo| repo.append_students(&students)) {
        Ok(count) => {
            log::info!("event=csv_import module=ffi status=ok count={count}");
            ImportResponse {
                ok: true,
                imported: count as u32,
                message: format!("Imported {count} student(s)."),
            }
        }
        Err(err) => ImportResponse {
            ok: false,
            imported: 0,
            message: format!("import_roster_csv failed: {err}"),
        },
    }
}

/// Writes the CSV import template to a file on disk.
///
/// # FFI contract
/// - Sync call, file-system write only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn write_csv_template(path: String) -> RosterActionResponse {
    match write_template_to_path(&path) {
        Ok(()) => RosterActionResponse {
            ok: true,
            student_id: None,
            message: format!("Template written to {path}."),
        },
        Err(err) => RosterActionResponse::failure(format!("write_csv_template failed: {err}")),
    }
}

/// Suggested download name for the CSV template.
#[flutter_rust_bridge::frb(sync)]
pub fn csv_template_file_name() -> String {
    TEMPLATE_FILE_NAME.to_owned()
}

/// Loads the school configuration (seeded default when never saved).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; falls back to the default configuration on errors.
#[flutter_rust_bridge::frb(sync)]
pub fn school_info() -> SchoolInfoView {
    let info = with_school_service(|service| service.school_info()).unwrap_or_default();
    SchoolInfoView {
        name: info.name,
        logo_url: info.logo_url,
        signature_url: info.signature_url,
        stamp_url: info.stamp_url,
    }
}

/// Replaces the school configuration.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn set_school_info(
    name: String,
    logo_url: Option<String>,
    signature_url: Option<String>,
    stamp_url: Option<String>,
) -> RosterActionResponse {
    let info = SchoolInfo {
        name,
        logo_url,
        signature_url,
        stamp_url,
    };
    match with_school_service(|service| service.update_school_info(&info)) {
        Ok(()) => RosterActionResponse {
            ok: true,
            student_id: None,
            message: "School configuration saved.".to_string(),
        },
        Err(err) => RosterActionResponse::failure(format!("set_school_info failed: {err}")),
    }
}

/// Computes the print layout for the current roster and selection.
///
/// A non-empty selection prints only the selected students; an empty
/// selection prints the whole roster.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Page slot counts always equal the grid capacity.
#[flutter_rust_bridge::frb(sync)]
pub fn print_layout() -> PrintLayoutResponse {
    let config = PrintConfig::default();

    let roster = match with_roster_service(|service| service.list_students(&RosterQuery::default()))
    {
        Ok(roster) => roster,
        Err(err) => {
            return PrintLayoutResponse {
                ok: false,
                pages: Vec::new(),
                card_width_mm: config.card_width_mm(),
                card_height_mm: config.card_height_mm(),
                message: format!("print_layout failed: {err}"),
            };
        }
    };

    let targets = {
        let selection = lock_selection();
        select_for_print(&roster, &selection)
    };
    let pages = paginate(&targets, &config)
        .iter()
        .map(|page| PrintPageView {
            student_ids: page.cards().map(|student| student.id.to_string()).collect(),
            placeholder_count: page.placeholder_count() as u32,
        })
        .collect::<Vec<_>>();

    let message = format!("{} page(s) to print.", pages.len());
    PrintLayoutResponse {
        ok: true,
        pages,
        card_width_mm: config.card_width_mm(),
        card_height_mm: config.card_height_mm(),
        message,
    }
}

fn parse_student_id(id: &str) -> Result<StudentId, String> {
    Uuid::parse_str(id.trim()).map_err(|_| format!("invalid student id: `{id}`"))
}

fn lock_selection() -> std::sync::MutexGuard<'static, Selection> {
    SELECTION
        .get_or_init(|| Mutex::new(Selection::new()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn resolve_roster_db_path() -> PathBuf {
    ROSTER_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SCOLACARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ROSTER_DB_FILE_NAME)
        })
        .clone()
}

fn with_roster_service<T>(
    f: impl FnOnce(&RosterService<SqliteRosterRepository<'_>>) -> scolacard_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_roster_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("roster DB open failed: {err}"))?;
    let repo = SqliteRosterRepository::try_new(&conn)
        .map_err(|err| format!("roster repo init failed: {err}"))?;
    let service = RosterService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn with_roster_repo<T>(
    f: impl FnOnce(&SqliteRosterRepository<'_>) -> scolacard_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_roster_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("roster DB open failed: {err}"))?;
    let repo = SqliteRosterRepository::try_new(&conn)
        .map_err(|err| format!("roster repo init failed: {err}"))?;
    f(&repo).map_err(|err| err.to_string())
}

fn with_school_service<T>(
    f: impl FnOnce(&SchoolService<SqliteSchoolRepository<'_>>) -> scolacard_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_roster_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("roster DB open failed: {err}"))?;
    let repo = SqliteSchoolRepository::try_new(&conn)
        .map_err(|err| format!("school repo init failed: {err}"))?;
    let service = SchoolService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn to_student_view(student: Student, selection: &Selection) -> StudentView {
    let qr_payload = student.qr_payload();
    let selected = selection.contains(student.id);
    StudentView {
        id: student.id.to_string(),
        first_name: student.first_name,
        last_name: student.last_name,
        matricule: student.matricule,
        class_name: student.class_name,
        school_year: student.school_year,
        birth_date: student.birth_date,
        birth_place: student.birth_place,
        exam_center: student.exam_center,
        photo_url: student.photo_url,
        qr_code_data: student.qr_code_data,
        qr_payload,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        clear_selection, core_version, delete_student, init_logging, list_students, ping,
        print_layout, register_student, selected_count, toggle_selected, update_student,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn register(token: &str) -> String {
        let response = register_student(
            format!("Jean-{token}"),
            "KOFFI".to_string(),
            format!("2024-TG-{token}"),
            "Terminale C".to_string(),
            "2025-2026".to_string(),
            None,
            None,
            None,
            None,
            None,
        );
        assert!(response.ok, "{}", response.message);
        response.student_id.expect("register should return an id")
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn register_then_list_finds_student() {
        let token = unique_token("list");
        let id = register(&token);

        let response = list_students(Some(token));
        assert_eq!(response.items.len(), 1, "{}", response.message);
        assert_eq!(response.items[0].id, id);
        assert_eq!(response.items[0].last_name, "KOFFI");
    }

    #[test]
    fn register_rejects_blank_required_field() {
        let response = register_student(
            String::new(),
            "KOFFI".to_string(),
            "2024-TG-000".to_string(),
            "Terminale C".to_string(),
            "2025-2026".to_string(),
            None,
            None,
            None,
            None,
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("firstName"));
    }

    #[test]
    fn update_replaces_fields_and_keeps_id() {
        let token = unique_token("update");
        let id = register(&token);

        let renamed = unique_token("update-renamed");
        let response = update_student(
            id.clone(),
            format!("Ama-{renamed}"),
            "MENSAH".to_string(),
            format!("2024-TG-{renamed}"),
            "Premiere D".to_string(),
            "2025-2026".to_string(),
            None,
            None,
            None,
            None,
            None,
        );
        assert!(response.ok, "{}", response.message);

        let listed = list_students(Some(renamed));
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, id);
        assert_eq!(listed.items[0].last_name, "MENSAH");
    }

    #[test]
    fn delete_removes_student_and_prunes_selection() {
        let token = unique_token("delete");
        let id = register(&token);

        clear_selection();
        assert!(toggle_selected(id.clone()));
        assert_eq!(selected_count(), 1);

        let response = delete_student(id);
        assert!(response.ok, "{}", response.message);
        assert_eq!(selected_count(), 0);

        let listed = list_students(Some(token));
        assert!(listed.items.is_empty());
    }

    #[test]
    fn delete_rejects_malformed_id() {
        let response = delete_student("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid student id"));
    }

    #[test]
    fn print_layout_reports_grid_geometry() {
        let response = print_layout();
        assert!(response.ok, "{}", response.message);
        assert!((response.card_width_mm - 92.5).abs() < 1e-9);
        assert!((response.card_height_mm - 52.4).abs() < 1e-9);
        for page in &response.pages {
            assert_eq!(page.student_ids.len() + page.placeholder_count as usize, 10);
        }
    }
}
