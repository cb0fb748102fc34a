//! `kv_store` table layout and its version stamp.
//!
//! The file holds one table. `PRAGMA user_version` records which layout was
//! created so a file written by a newer build is refused instead of misread.
//! The task blob inside `kv_store.value` is not versioned.

use crate::db::{DbError, DbResult};
use rusqlite::{Connection, TransactionBehavior};

/// Layout version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_KV_STORE: &str = include_str!("kv_store.sql");

/// Creates the `kv_store` table on a fresh file and stamps its version.
///
/// # Errors
/// - `SchemaTooNew` when the stamp is above [`SCHEMA_VERSION`].
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = stamped_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    tx.execute_batch(CREATE_KV_STORE)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}

/// Version stamp currently stored in the file; `0` for a fresh database.
pub fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, stamped_version, SCHEMA_VERSION};
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_gets_table_and_stamp() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(stamped_version(&conn).unwrap(), 0);

        ensure_schema(&mut conn).unwrap();
        ensure_schema(&mut conn).unwrap();

        assert_eq!(stamped_version(&conn).unwrap(), SCHEMA_VERSION);
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }
}
