use daybook_core::{
    ArchiveError, ConflictPolicy, DayArchive, FsStorage, MemStorage, Storage, StorageError,
};

#[test]
fn start_day_creates_the_month_directory_chain() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days");

    let record = archive.start_day("2024-06-15").unwrap();

    assert_eq!(archive.root(), "days");
    assert_eq!(record.path, "days/2024/6/15");
    assert_eq!(record.root, "days");
    assert!(storage.exists("days/2024/6"));
    // Nothing is persisted until an explicit save.
    assert_eq!(storage.blob_count(), 0);
}

#[test]
fn start_day_is_idempotent_over_shared_prefixes() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days");

    archive.start_day("2024-06-15").unwrap();
    archive.start_day("2024-06-16").unwrap();
    archive.start_day("2024-7-1").unwrap();

    assert!(storage.exists("days/2024/6"));
    assert!(storage.exists("days/2024/7"));
}

#[test]
fn start_day_rejects_malformed_dates() {
    let archive = DayArchive::new(MemStorage::new(), "days");

    let err = archive.start_day("2024/06/15").unwrap_err();
    assert!(matches!(err, ArchiveError::Date(_)));
}

#[test]
fn occupied_path_fails_under_strict_policy() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days");

    let record = archive.start_day("2024-06-15").unwrap();
    archive.save(&record).unwrap();

    let err = archive.start_day("2024-06-15").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::PathConflict { path } if path == "days/2024/6/15"
    ));
}

#[test]
fn occupied_path_proceeds_under_warn_policy() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days").with_create_policy(ConflictPolicy::Warn);

    let record = archive.start_day("2024-06-15").unwrap();
    archive.save(&record).unwrap();

    let again = archive.start_day("2024-06-15").unwrap();
    assert_eq!(again.path, record.path);
}

#[test]
fn save_then_load_roundtrips_every_field() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days");

    let mut record = archive.start_day("2024-06-15").unwrap();
    record.add_today("Buy milk");
    let toggled = record.add_today("Write tests");
    record.toggle_today(toggled).unwrap();
    record.add_tomorrow("Call plumber");
    record.note = "quiet afternoon".to_string();

    archive.save(&record).unwrap();
    let loaded = archive.load(&record.path).unwrap();

    assert_eq!(loaded, record);
}

#[test]
fn save_overwrites_after_a_warning() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "days");

    let mut record = archive.start_day("2024-06-15").unwrap();
    archive.save(&record).unwrap();

    record.add_today("added later");
    archive.save(&record).unwrap();

    let loaded = archive.load(&record.path).unwrap();
    assert_eq!(loaded.today_tasks.len(), 2);
}

#[test]
fn roundtrip_through_the_filesystem_backend() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("days").display().to_string();
    let archive = DayArchive::new(FsStorage::new(), root.as_str());

    let mut record = archive.start_day("2024-03-01").unwrap();
    record.add_today("Buy milk");
    record.note = "fs backend".to_string();
    archive.save(&record).unwrap();

    // Derived path is plain decimal, never zero-padded.
    assert!(record.path.ends_with("days/2024/3/1"));
    assert!(dir.path().join("days/2024/3/1").is_file());
    assert!(!dir.path().join("days/2024/03/01").exists());

    let loaded = archive.load(&record.path).unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn empty_root_files_records_under_a_relative_path() {
    let storage = MemStorage::new();
    let archive = DayArchive::new(&storage, "");

    let record = archive.start_day("2024-06-15").unwrap();
    archive.save(&record).unwrap();

    assert_eq!(record.path, "2024/6/15");
    assert!(storage.exists("2024/6/15"));
}

#[test]
fn load_missing_path_surfaces_storage_not_found() {
    let archive = DayArchive::new(MemStorage::new(), "days");

    let err = archive.load("days/2024/6/15").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::Storage(StorageError::NotFound { .. })
    ));
}

#[test]
fn load_rejects_a_newer_schema_version() {
    let storage = MemStorage::new();
    storage
        .write_blob("days/2024/6/15", br#"{"schema_version": 7}"#)
        .unwrap();
    let archive = DayArchive::new(&storage, "days");

    let err = archive.load("days/2024/6/15").unwrap_err();
    assert!(matches!(
        err,
        ArchiveError::UnsupportedSchemaVersion {
            found: 7,
            latest_supported: 1
        }
    ));
}

#[test]
fn load_rejects_malformed_payloads() {
    let storage = MemStorage::new();
    storage.write_blob("days/2024/6/15", b"not json").unwrap();
    let archive = DayArchive::new(&storage, "days");

    let err = archive.load("days/2024/6/15").unwrap_err();
    assert!(matches!(err, ArchiveError::Malformed { .. }));
}

#[test]
fn load_revalidates_stored_date_components() {
    let storage = MemStorage::new();
    let blob = br#"{
        "schema_version": 1,
        "year": 2024,
        "month": 13,
        "day": 1,
        "today_tasks": {"0": {"text": "Survive", "done": true}},
        "tomorrow_tasks": {"0": {"text": "Survive", "done": true}},
        "note": "",
        "root": "days"
    }"#;
    storage.write_blob("days/2024/13/1", blob).unwrap();
    let archive = DayArchive::new(&storage, "days");

    let err = archive.load("days/2024/13/1").unwrap_err();
    assert!(matches!(err, ArchiveError::Date(_)));
}
