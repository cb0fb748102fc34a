use rusqlite::Connection;
use todo_core::db::schema::SCHEMA_VERSION;
use todo_core::db::DbError;
use todo_core::{
    clear_tasks, load_tasks, save_tasks, try_load_tasks, KeyValueStore, MemoryKeyValueStore,
    SqliteKeyValueStore, StorageError, Task, TASKS_STORAGE_KEY,
};

fn sample() -> Vec<Task> {
    vec![
        Task {
            id: 3,
            title: "Call the dentist".to_string(),
            completed: false,
        },
        Task {
            id: 1,
            title: "  spaced \"quoted\" ünïcode  ".to_string(),
            completed: true,
        },
    ]
}

#[test]
fn save_then_load_round_trips_in_memory() {
    let store = MemoryKeyValueStore::new();
    save_tasks(&store, &sample()).unwrap();
    assert_eq!(load_tasks(&store), Some(sample()));
}

#[test]
fn save_then_load_round_trips_empty_list() {
    let store = MemoryKeyValueStore::new();
    save_tasks(&store, &[]).unwrap();
    assert_eq!(load_tasks(&store), Some(Vec::new()));
}

#[test]
fn unset_key_loads_as_absent() {
    assert_eq!(load_tasks(&MemoryKeyValueStore::new()), None);
}

#[test]
fn malformed_blobs_load_as_absent() {
    let blobs = [
        "not json",
        r#"{"id":1}"#,
        r#"[{"id":"1","title":"a","completed":false}]"#,
        r#"[{"id":1,"title":"a","completed":"no"}]"#,
        r#"[{"id":1,"title":"a"}]"#,
        r#"[{"id":1,"title":"a","completed":false},{"id":1,"title":"b","completed":true}]"#,
    ];

    for blob in blobs {
        let store = MemoryKeyValueStore::new();
        store.set(TASKS_STORAGE_KEY, blob).unwrap();
        assert_eq!(load_tasks(&store), None, "blob should be rejected: {blob}");
    }
}

#[test]
fn duplicate_ids_report_invalid_data() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            TASKS_STORAGE_KEY,
            r#"[{"id":4,"title":"a","completed":false},{"id":4,"title":"b","completed":false}]"#,
        )
        .unwrap();
    let err = try_load_tasks(&store).unwrap_err();
    assert!(matches!(err, StorageError::InvalidData(_)));
}

#[test]
fn extra_fields_are_ignored() {
    let store = MemoryKeyValueStore::new();
    store
        .set(
            TASKS_STORAGE_KEY,
            r#"[{"id":1,"title":"a","completed":false,"color":"red"}]"#,
        )
        .unwrap();
    assert_eq!(load_tasks(&store).unwrap().len(), 1);
}

#[test]
fn blob_is_a_plain_json_array_under_fixed_key() {
    let store = MemoryKeyValueStore::new();
    save_tasks(&store, &sample()[..1]).unwrap();
    let raw = store.get("TodoApp").unwrap().unwrap();
    assert_eq!(
        raw,
        r#"[{"id":3,"title":"Call the dentist","completed":false}]"#
    );
}

#[test]
fn clear_tasks_removes_blob() {
    let store = MemoryKeyValueStore::new();
    save_tasks(&store, &sample()).unwrap();
    clear_tasks(&store).unwrap();
    assert_eq!(load_tasks(&store), None);
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");

    {
        let store = SqliteKeyValueStore::open(&path).unwrap();
        save_tasks(&store, &sample()).unwrap();
    }

    let reopened = SqliteKeyValueStore::open(&path).unwrap();
    assert_eq!(load_tasks(&reopened), Some(sample()));
}

#[test]
fn sqlite_schema_is_applied_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");

    drop(SqliteKeyValueStore::open(&path).unwrap());
    drop(SqliteKeyValueStore::open(&path).unwrap());

    let conn = Connection::open(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, SCHEMA_VERSION);
}

#[test]
fn sqlite_file_from_newer_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteKeyValueStore::open(&path) {
        Err(StorageError::Db(DbError::SchemaTooNew { found, supported })) => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be rejected"),
    }
}
