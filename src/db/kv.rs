// src/db/kv.rs
//
// Flat key/value slots. The whole dashboard document lives under one key;
// market-intel settings and recent searches use their own keys.

use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, ServerError> {
    conn.query_row("select value from kv where key = ?", params![key], |row| {
        row.get(0)
    })
    .optional()
    .map_err(|e| ServerError::DbError(format!("kv get '{key}' failed: {e}")))
}

/// Overwrite a key in a single statement.
pub fn put(conn: &Connection, key: &str, value: &str) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into kv (key, value, updated_at) values (?1, ?2, ?3)
        on conflict(key) do update set value = excluded.value, updated_at = excluded.updated_at
        "#,
        params![key, value, Utc::now().timestamp_millis()],
    )
    .map_err(|e| ServerError::DbError(format!("kv put '{key}' failed: {e}")))?;
    Ok(())
}

pub fn remove(conn: &Connection, key: &str) -> Result<(), ServerError> {
    conn.execute("delete from kv where key = ?", params![key])
        .map_err(|e| ServerError::DbError(format!("kv remove '{key}' failed: {e}")))?;
    Ok(())
}
