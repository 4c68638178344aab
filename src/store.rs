//! Persisted client state.
//!
//! A string-keyed, JSON-valued table in SQLite under the app data dir.
//! Persistence is best-effort: when the disk database cannot be opened
//! the store degrades to an in-memory connection — every feature keeps
//! working, state just does not survive a restart.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::language::Language;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Key not allowed: {0}")]
    KeyNotAllowed(String),
}

/// Whitelisted state keys. Only these can be written, which keeps the
/// table from becoming an arbitrary data store.
const ALLOWED_KEYS: &[&str] = &[
    KEY_USER,
    KEY_LANGUAGE,
    KEY_ONBOARDING_COMPLETE,
    KEY_LANGUAGE_SELECTED,
    KEY_EMERGENCY_INFO,
    KEY_EMERGENCY_QR_PAYLOAD,
];

const KEY_USER: &str = "user";
const KEY_LANGUAGE: &str = "language";
const KEY_ONBOARDING_COMPLETE: &str = "onboarding_complete";
const KEY_LANGUAGE_SELECTED: &str = "language_selected";
const KEY_EMERGENCY_INFO: &str = "emergency_info";
const KEY_EMERGENCY_QR_PAYLOAD: &str = "emergency_qr_payload";

/// Local identity record; no server account behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub display_name: String,
}

impl UserRecord {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
        }
    }
}

/// Emergency medical info entered by the user; source text for the
/// compact QR payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyInfo {
    pub full_name: String,
    pub blood_type: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub conditions: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

/// Key-value client-state store.
pub struct ClientStore {
    conn: Connection,
    persistent: bool,
}

impl ClientStore {
    /// Open the store at its default location, degrading to in-memory
    /// when the disk database is unavailable.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = config::app_data_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!(error = %e, "cannot create app data dir, using in-memory state");
            return Self::in_memory();
        }
        match Self::open(dir.join(config::STORE_FILE)) {
            Ok(store) => Ok(store),
            Err(e) => {
                tracing::warn!(error = %e, "cannot open client store, using in-memory state");
                Self::in_memory()
            }
        }
    }

    /// Open the store at an explicit path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            persistent: true,
        })
    }

    /// In-memory store: fully functional, nothing survives a restart.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            persistent: false,
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS client_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Whether state written here survives a restart.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    // ── Raw key-value layer ──────────────────────────────────

    fn set_raw(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        if !ALLOWED_KEYS.contains(&key) {
            return Err(StoreError::KeyNotAllowed(key.to_string()));
        }
        self.conn.execute(
            "INSERT INTO client_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM client_state WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => {
                let text: String = row.get(0)?;
                Ok(Some(serde_json::from_str(&text)?))
            }
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_raw(key, &serde_json::to_value(value)?)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // ── Typed accessors ──────────────────────────────────────

    pub fn set_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.set(KEY_USER, user)
    }

    pub fn user(&self) -> Result<Option<UserRecord>, StoreError> {
        self.get(KEY_USER)
    }

    pub fn set_language(&self, lang: Language) -> Result<(), StoreError> {
        self.set(KEY_LANGUAGE, &lang)
    }

    /// The selected language; `None` until the user picks one.
    pub fn language(&self) -> Result<Option<Language>, StoreError> {
        self.get(KEY_LANGUAGE)
    }

    pub fn set_onboarding_complete(&self, done: bool) -> Result<(), StoreError> {
        self.set(KEY_ONBOARDING_COMPLETE, &done)
    }

    pub fn onboarding_complete(&self) -> Result<bool, StoreError> {
        Ok(self.get(KEY_ONBOARDING_COMPLETE)?.unwrap_or(false))
    }

    pub fn set_language_selected(&self, done: bool) -> Result<(), StoreError> {
        self.set(KEY_LANGUAGE_SELECTED, &done)
    }

    pub fn language_selected(&self) -> Result<bool, StoreError> {
        Ok(self.get(KEY_LANGUAGE_SELECTED)?.unwrap_or(false))
    }

    pub fn set_emergency_info(&self, info: &EmergencyInfo) -> Result<(), StoreError> {
        self.set(KEY_EMERGENCY_INFO, info)
    }

    pub fn emergency_info(&self) -> Result<Option<EmergencyInfo>, StoreError> {
        self.get(KEY_EMERGENCY_INFO)
    }

    /// Persist the compact QR payload produced by the summarize
    /// capability.
    pub fn set_qr_payload(&self, payload: &str) -> Result<(), StoreError> {
        self.set(KEY_EMERGENCY_QR_PAYLOAD, &payload)
    }

    pub fn qr_payload(&self) -> Result<Option<String>, StoreError> {
        self.get(KEY_EMERGENCY_QR_PAYLOAD)
    }
}
