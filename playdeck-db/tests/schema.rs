use playdeck_db::*;

#[test]
fn open_memory_creates_tables() {
    let conn = open_memory().unwrap();
    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    for expected in ["categories", "games", "import_log", "schema_version"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {expected}");
    }
}

#[test]
fn open_database_creates_parent_dirs_and_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO categories (name, slug) VALUES ('Action', 'action')",
            [],
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();
    }

    match open_database(&path) {
        Err(SchemaError::VersionMismatch { found, .. }) => assert_eq!(found, 99),
        other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn version_one_database_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (
                 version INTEGER NOT NULL,
                 applied_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE import_log (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 source TEXT NOT NULL,
                 attempted INTEGER NOT NULL DEFAULT 0,
                 succeeded INTEGER NOT NULL DEFAULT 0,
                 failed INTEGER NOT NULL DEFAULT 0,
                 imported_at TEXT NOT NULL
             );",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    conn.execute(
        "INSERT INTO import_log (source, page, imported_at) VALUES ('gamepix', 3, 'now')",
        [],
    )
    .unwrap();
    let version: i32 = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, playdeck_db::schema::CURRENT_VERSION);
}

#[test]
fn unusable_parent_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let result = open_database(&blocker.join("nested").join("catalog.db"));
    match result {
        Err(SchemaError::Io { path, .. }) => assert!(path.ends_with("nested")),
        Err(other) => panic!("expected Io, got {other:?}"),
        Ok(_) => panic!("expected Io error"),
    }
}
