use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::schema;

/// Persistent key-value storage for client state that must survive reloads.
///
/// Values are JSON-encoded strings in a single `kv` table. The session store
/// keeps the signed-in identity and the `authenticated` flag here; the
/// business store keeps the tenant profile. Credentials are never written.
#[derive(Clone)]
pub struct KvStore {
    conn: Arc<Mutex<Connection>>,
}

impl KvStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Storage path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "pocketledger")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("client_state.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        let json = serde_json::to_string(value)?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, &json, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Read a value back, or `None` if the key was never written.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            let json: String = row.get(0)?;
            Ok(Some(serde_json::from_str(&json)?))
        } else {
            Ok(None)
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().expect("storage lock poisoned");
        conn.execute("DELETE FROM kv", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> KvStore {
        let kv = KvStore::open_memory().unwrap();
        kv.migrate().unwrap();
        kv
    }

    #[test]
    fn round_trips_json_values() {
        let kv = open();
        kv.put_json("flag", &true).unwrap();
        assert_eq!(kv.get_json::<bool>("flag").unwrap(), Some(true));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let kv = open();
        assert_eq!(kv.get_json::<bool>("absent").unwrap(), None);
    }

    #[test]
    fn put_replaces_previous_value() {
        let kv = open();
        kv.put_json("name", &"first").unwrap();
        kv.put_json("name", &"second").unwrap();
        assert_eq!(
            kv.get_json::<String>("name").unwrap(),
            Some("second".to_string())
        );
    }

    #[test]
    fn remove_deletes_the_key() {
        let kv = open();
        kv.put_json("flag", &true).unwrap();
        kv.remove("flag").unwrap();
        assert_eq!(kv.get_json::<bool>("flag").unwrap(), None);
    }

    #[test]
    fn clear_drops_everything() {
        let kv = open();
        kv.put_json("a", &1).unwrap();
        kv.put_json("b", &2).unwrap();
        kv.clear().unwrap();
        assert_eq!(kv.get_json::<i32>("a").unwrap(), None);
        assert_eq!(kv.get_json::<i32>("b").unwrap(), None);
    }
}
