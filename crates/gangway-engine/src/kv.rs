// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in key/value engine backed by SQLite.
//
// The smallest engine worth bridging: a persistent JSON key/value store
// bound to the storage directory at setup, plus `ping` and `echo` for
// liveness checks from the host. Values are stored as serialized JSON text
// and reconstructed losslessly on read.

use rusqlite::{Connection, params};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use gangway_core::error::{GangwayError, Result};

use crate::traits::NativeEngine;

/// Database file created inside the storage directory.
const DB_FILE: &str = "engine.db";

/// SQLite schema for the kv table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
"#;

/// SQLite-backed key/value engine.
///
/// All operations run under a single connection mutex; concurrent dispatch
/// from multiple bridge workers serializes here. `rusqlite` is synchronous,
/// which is fine — the bridge already runs every call on a blocking worker.
pub struct KvEngine {
    conn: Mutex<Option<Connection>>,
}

impl Default for KvEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl KvEngine {
    /// An engine with no storage yet; `setup` opens the database.
    pub fn new() -> Self {
        Self {
            conn: Mutex::new(None),
        }
    }

    /// An engine over an in-memory database, already set up (useful for
    /// tests — `setup` becomes a no-op).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GangwayError::Database(format!("open in-memory: {e}")))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| GangwayError::Database(format!("create table: {e}")))?;

        debug!("in-memory kv engine opened");
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn set(conn: &Connection, op: &str, args: &Value) -> Result<Value> {
        let key = require_key(op, args)?;
        let value = args
            .get("value")
            .ok_or_else(|| fault(op, "missing field 'value'"))?;
        let value_text = serde_json::to_string(value)?;

        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value_text],
        )
        .map_err(|e| GangwayError::Database(format!("kv.set: {e}")))?;

        debug!(key, "kv entry written");
        Ok(Value::Null)
    }

    fn get(conn: &Connection, op: &str, args: &Value) -> Result<Value> {
        let key = require_key(op, args)?;

        let mut stmt = conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(|e| GangwayError::Database(format!("prepare kv.get: {e}")))?;
        let mut rows = stmt
            .query(params![key])
            .map_err(|e| GangwayError::Database(format!("query kv.get: {e}")))?;

        match rows
            .next()
            .map_err(|e| GangwayError::Database(format!("row kv.get: {e}")))?
        {
            Some(row) => {
                let text: String = row
                    .get(0)
                    .map_err(|e| GangwayError::Database(format!("column kv.get: {e}")))?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(Value::Null),
        }
    }

    fn delete(conn: &Connection, op: &str, args: &Value) -> Result<Value> {
        let key = require_key(op, args)?;

        let rows = conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| GangwayError::Database(format!("kv.delete: {e}")))?;

        Ok(json!({ "deleted": rows > 0 }))
    }
}

impl NativeEngine for KvEngine {
    fn name(&self) -> &str {
        "kv"
    }

    fn setup(&self, storage_dir: &Path) -> Result<()> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            // Already open (in-memory constructor) — nothing to bind.
            return Ok(());
        }

        let path = storage_dir.join(DB_FILE);
        let conn = Connection::open(&path)
            .map_err(|e| GangwayError::Database(format!("open: {e}")))?;

        // WAL survives unclean shutdowns more gracefully, which matters on
        // mobile where the process is killed rather than exited.
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| GangwayError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| GangwayError::Database(format!("create table: {e}")))?;

        info!(path = %path.display(), "kv engine database opened");
        *guard = Some(conn);
        Ok(())
    }

    fn execute(&self, op: &str, args: Value) -> Result<Value> {
        let guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = guard
            .as_ref()
            .ok_or_else(|| GangwayError::Database("storage not opened".into()))?;

        match op {
            "ping" => Ok(json!({ "pong": true })),
            "echo" => Ok(args),
            "kv.set" => Self::set(conn, op, &args),
            "kv.get" => Self::get(conn, op, &args),
            "kv.delete" => Self::delete(conn, op, &args),
            _ => Err(fault(op, "unknown operation")),
        }
    }
}

/// Engine-level rejection for a well-formed request the engine cannot honor.
fn fault(op: &str, message: &str) -> GangwayError {
    GangwayError::NativeFault {
        op: op.to_string(),
        message: message.to_string(),
    }
}

/// Every kv operation addresses a string `key` argument.
fn require_key<'a>(op: &str, args: &'a Value) -> Result<&'a str> {
    args.get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| fault(op, "missing string field 'key'"))
}
