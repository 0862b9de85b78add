use newsgate_core::db::migrations::latest_version;
use newsgate_core::db::{open_pool, open_pool_in_memory, DbError};
use newsgate_core::GatewayConfig;
use rusqlite::Connection;

#[test]
fn in_memory_pool_applies_all_migrations() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "agencies");
    assert_table_exists(&conn, "news_items");
    assert_eq!(pool.max_size(), 1);
}

#[test]
fn pooled_connections_enforce_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GatewayConfig::new(dir.path().join("news.db"));
    config.max_connections = 3;
    let pool = open_pool(&config).unwrap();

    let held: Vec<_> = (0..3).map(|_| pool.get().unwrap()).collect();
    for conn in &held {
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}

#[test]
fn reopening_same_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = GatewayConfig::new(dir.path().join("news.db"));

    let first = open_pool(&config).unwrap();
    first
        .get()
        .unwrap()
        .execute("INSERT INTO agencies (name) VALUES ('Reuters');", [])
        .unwrap();
    drop(first);

    let second = open_pool(&config).unwrap();
    let conn = second.get().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM agencies;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_pool(&GatewayConfig::new(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreachable_database_path_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GatewayConfig::new(dir.path().join("missing").join("news.db"));
    config.connection_timeout_secs = 1;

    let err = open_pool(&config).unwrap_err();
    assert!(matches!(err, DbError::Pool(_)));
}

#[test]
fn agency_names_are_unique_at_store_level() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();
    conn.execute("INSERT INTO agencies (name) VALUES ('AP');", [])
        .unwrap();

    let duplicate = conn.execute("INSERT INTO agencies (name) VALUES ('AP');", []);
    assert!(duplicate.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
