use scolacard_core::db::open_db_in_memory;
use scolacard_core::{
    parse_students, parse_students_from_path, template_csv, RosterQuery, RosterRepository,
    RosterService, SqliteRosterRepository, DEFAULT_SCHOOL_YEAR, TEMPLATE_FILE_NAME,
};
use std::collections::HashSet;
use std::io::Write;

#[test]
fn parses_english_headers() {
    let csv = "lastName,firstName,matricule,className,schoolYear,examCenter,photoUrl\n\
               KOFFI,Jean,2024-TG-001,Terminale C,2025-2026,Lycée de Tokoin,photos/koffi.png\n";

    let students = parse_students(csv.as_bytes()).unwrap();
    assert_eq!(students.len(), 1);

    let student = &students[0];
    assert!(!student.id.is_nil());
    assert_eq!(student.first_name, "Jean");
    assert_eq!(student.last_name, "KOFFI");
    assert_eq!(student.matricule, "2024-TG-001");
    assert_eq!(student.class_name, "Terminale C");
    assert_eq!(student.school_year, "2025-2026");
    assert_eq!(student.exam_center.as_deref(), Some("Lycée de Tokoin"));
    assert_eq!(student.photo_url.as_deref(), Some("photos/koffi.png"));
}

#[test]
fn parses_french_headers() {
    let csv = "nom,prenom,matricule,classe,annee,centre,photo\n\
               MENSAH,Ama,2024-TG-002,Premiere D,2024-2025,CEG Agoè,\n";

    let students = parse_students(csv.as_bytes()).unwrap();
    assert_eq!(students.len(), 1);

    let student = &students[0];
    assert_eq!(student.first_name, "Ama");
    assert_eq!(student.last_name, "MENSAH");
    assert_eq!(student.class_name, "Premiere D");
    assert_eq!(student.school_year, "2024-2025");
    assert_eq!(student.exam_center.as_deref(), Some("CEG Agoè"));
    assert_eq!(student.photo_url, None);
}

#[test]
fn missing_columns_coerce_to_empty_and_school_year_defaults() {
    let csv = "nom,prenom\nKOFFI,Jean\n";

    let students = parse_students(csv.as_bytes()).unwrap();
    assert_eq!(students.len(), 1);

    let student = &students[0];
    assert_eq!(student.first_name, "Jean");
    assert_eq!(student.last_name, "KOFFI");
    assert_eq!(student.matricule, "");
    assert_eq!(student.class_name, "");
    assert_eq!(student.school_year, DEFAULT_SCHOOL_YEAR);
    assert_eq!(student.exam_center, None);
}

#[test]
fn short_rows_are_tolerated() {
    let csv = "lastName,firstName,matricule\nKOFFI\nMENSAH,Ama\n";

    let students = parse_students(csv.as_bytes()).unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].last_name, "KOFFI");
    assert_eq!(students[0].first_name, "");
    assert_eq!(students[1].first_name, "Ama");
}

#[test]
fn empty_input_yields_no_students() {
    let students = parse_students("".as_bytes()).unwrap();
    assert!(students.is_empty());
}

#[test]
fn each_imported_row_gets_a_fresh_unique_id() {
    let csv = "nom,prenom\nA,a\nB,b\nC,c\n";

    let students = parse_students(csv.as_bytes()).unwrap();
    let ids: HashSet<_> = students.iter().map(|student| student.id).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn import_appends_exactly_n_records_to_existing_roster() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(SqliteRosterRepository::try_new(&conn).unwrap());

    let existing = scolacard_core::Student::new(
        "Jean",
        "KOFFI",
        "2024-TG-001",
        "Terminale C",
        "2025-2026",
    );
    SqliteRosterRepository::try_new(&conn)
        .unwrap()
        .create_student(&existing)
        .unwrap();

    let csv = "nom,prenom,matricule\nMENSAH,Ama,2024-TG-002\nAGBEKO,Kossi,2024-TG-003\n";
    let imported = service.import_csv(csv.as_bytes()).unwrap();
    assert_eq!(imported, 2);

    let roster = service.list_students(&RosterQuery::default()).unwrap();
    assert_eq!(roster.len(), 3);
    // Appended after the existing records, in file order.
    assert_eq!(roster[0].id, existing.id);
    assert_eq!(roster[1].last_name, "MENSAH");
    assert_eq!(roster[2].last_name, "AGBEKO");
}

#[test]
fn import_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eleves.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "nom,prenom\nKOFFI,Jean\n").unwrap();
    drop(file);

    let students = parse_students_from_path(&path).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].first_name, "Jean");
}

#[test]
fn import_from_missing_path_is_an_io_error() {
    let err = parse_students_from_path("/nonexistent/eleves.csv").unwrap_err();
    assert!(matches!(
        err,
        scolacard_core::TransferError::Io(_)
    ));
}

#[test]
fn template_has_header_and_one_example_row() {
    let template = template_csv();
    let lines: Vec<&str> = template.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "lastName,firstName,matricule,className,schoolYear,examCenter,photoUrl"
    );
    assert!(lines[1].starts_with("KOFFI,Jean,2024-TG-001"));
    assert_eq!(TEMPLATE_FILE_NAME, "modele_import_eleves.csv");
}

#[test]
fn template_roundtrips_through_the_importer() {
    let students = parse_students(template_csv().as_bytes()).unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].last_name, "KOFFI");
    assert_eq!(students[0].exam_center.as_deref(), Some("Lycée de Tokoin"));
    assert_eq!(students[0].photo_url, None);
}
