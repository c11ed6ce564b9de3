pub mod schema;
pub mod store;

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};

/// Database connection wrapper shared by the stores
#[derive(Clone)]
pub struct Database {
  conn: Arc<Mutex<Connection>>,
}

impl Database {
  /// Open or create the database at the default location
  pub fn open() -> Result<Self> {
    let path = Self::default_path()?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| Error::LocalStore(format!("failed to create database directory: {}", e)))?;
    }

    let conn = Connection::open(&path).map_err(|e| {
      Error::LocalStore(format!("failed to open database at {}: {}", path.display(), e))
    })?;

    Self::from_connection(conn)
  }

  /// Open an in-memory database. Used by tests.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_connection(Connection::open_in_memory()?)
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    let db = Self {
      conn: Arc::new(Mutex::new(conn)),
    };
    db.run_migrations()?;
    Ok(db)
  }

  /// Get the default database path
  fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| Error::LocalStore("could not determine data directory".to_string()))?;

    Ok(data_dir.join("pantry").join("recipes.db"))
  }

  /// Run database migrations
  fn run_migrations(&self) -> Result<()> {
    let conn = self.lock()?;
    conn
      .execute_batch(schema::SCHEMA)
      .map_err(|e| Error::LocalStore(format!("failed to run migrations: {}", e)))?;
    Ok(())
  }

  pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
    Ok(self.conn.lock()?)
  }
}
