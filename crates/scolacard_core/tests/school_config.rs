use scolacard_core::db::open_db_in_memory;
use scolacard_core::{SchoolInfo, SchoolRepository, SchoolService, SqliteSchoolRepository};

#[test]
fn load_returns_seeded_default_before_first_save() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let info = repo.load_school_info().unwrap();
    assert_eq!(info, SchoolInfo::default());
    assert_eq!(info.name, "ÉCOLE NATIONALE DU TOGO");
    assert!(info.logo_url.is_some());
}

#[test]
fn save_and_load_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSchoolRepository::try_new(&conn).unwrap();

    let info = SchoolInfo {
        name: "Lycée de Tokoin".to_string(),
        logo_url: Some("logos/tokoin.png".to_string()),
        signature_url: Some("signatures/head.png".to_string()),
        stamp_url: None,
    };
    repo.save_school_info(&info).unwrap();

    let loaded = repo.load_school_info().unwrap();
    assert_eq!(loaded, info);
}

#[test]
fn repeated_saves_edit_the_singleton_in_place() {
    let conn = open_db_in_memory().unwrap();
    let service = SchoolService::new(SqliteSchoolRepository::try_new(&conn).unwrap());

    let mut info = service.school_info().unwrap();
    info.name = "Collège Saint-Joseph".to_string();
    service.update_school_info(&info).unwrap();

    info.signature_url = Some("signatures/director.png".to_string());
    service.update_school_info(&info).unwrap();

    let loaded = service.school_info().unwrap();
    assert_eq!(loaded.name, "Collège Saint-Joseph");
    assert_eq!(
        loaded.signature_url.as_deref(),
        Some("signatures/director.png")
    );

    // Still a single storage row, replaced in place.
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM storage WHERE key = 'scolacard_school';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}
