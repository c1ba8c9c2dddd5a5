use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, ToSql};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::models::{DisplayType, Wishlist};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("wishlist already exists")]
    WishlistExists,
    #[error("wishlist {0} not found")]
    NotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage seam for wishlist persistence. Handlers depend on this trait so
/// tests can swap in doubles.
pub trait WishlistStore: Send + Sync {
    fn save_wishlist(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        display_type: DisplayType,
    ) -> StoreResult<i64>;

    fn get_wishlist(&self, id: i64) -> StoreResult<Wishlist>;

    fn get_wishlists(&self, owner_id: i64) -> StoreResult<Vec<Wishlist>>;
}

/// Thread-safe SQLite store
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Create a new store with the given database path
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store for testing
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS wishlists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 100),
                description TEXT CHECK (length(description) <= 500),
                display_type INTEGER NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_wishlists_owner_name ON wishlists(owner_id, name);
            CREATE INDEX IF NOT EXISTS idx_wishlists_owner ON wishlists(owner_id);

            CREATE TABLE IF NOT EXISTS wishes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                wishlist_id INTEGER NOT NULL,
                name TEXT NOT NULL CHECK (length(name) <= 100),
                description TEXT CHECK (length(description) <= 500),
                wish_url TEXT,
                image_url TEXT,
                assigned_to_id INTEGER,
                FOREIGN KEY (wishlist_id) REFERENCES wishlists(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_wishes_wishlist_id ON wishes(wishlist_id);
            "#,
        )?;
        Ok(())
    }

    fn row_to_wishlist(&self, row: &rusqlite::Row) -> rusqlite::Result<Wishlist> {
        Ok(Wishlist {
            id: row.get("id")?,
            owner_id: row.get("owner_id")?,
            name: row.get("name")?,
            description: row
                .get::<_, Option<String>>("description")?
                .unwrap_or_default(),
            display_type: row.get("display_type")?,
        })
    }
}

impl WishlistStore for SqliteStore {
    fn save_wishlist(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        display_type: DisplayType,
    ) -> StoreResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"INSERT INTO wishlists (owner_id, name, description, display_type)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![owner_id, name, description, display_type],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::WishlistExists
            }
            other => StoreError::Database(other),
        })?;
        Ok(conn.last_insert_rowid())
    }

    fn get_wishlist(&self, id: i64) -> StoreResult<Wishlist> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            r#"SELECT id, owner_id, name, description, display_type
               FROM wishlists WHERE id = ?1"#,
            params![id],
            |row| self.row_to_wishlist(row),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(id),
            _ => StoreError::Database(e),
        })
    }

    fn get_wishlists(&self, owner_id: i64) -> StoreResult<Vec<Wishlist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"SELECT id, owner_id, name, description, display_type
               FROM wishlists WHERE owner_id = ?1"#,
        )?;
        let rows = stmt.query_map(params![owner_id], |row| self.row_to_wishlist(row))?;

        let mut wishlists = Vec::new();
        for row in rows {
            wishlists.push(row?);
        }
        Ok(wishlists)
    }
}

impl ToSql for DisplayType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(*self)))
    }
}

impl FromSql for DisplayType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        Self::try_from(raw).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get_wishlist() {
        let store = SqliteStore::in_memory().unwrap();

        let id = store
            .save_wishlist(1, "Birthday", "things I want", DisplayType::Public)
            .unwrap();
        assert!(id > 0);

        let wishlist = store.get_wishlist(id).unwrap();
        assert_eq!(wishlist.id, id);
        assert_eq!(wishlist.owner_id, 1);
        assert_eq!(wishlist.name, "Birthday");
        assert_eq!(wishlist.description, "things I want");
        assert_eq!(wishlist.display_type, DisplayType::Public);
    }

    #[test]
    fn test_get_missing_wishlist_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();

        let err = store.get_wishlist(404).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(404)));
    }

    #[test]
    fn test_duplicate_name_for_same_owner_is_exists_error() {
        let store = SqliteStore::in_memory().unwrap();

        store
            .save_wishlist(1, "Birthday", "", DisplayType::Public)
            .unwrap();
        let err = store
            .save_wishlist(1, "Birthday", "", DisplayType::ByLink)
            .unwrap_err();
        assert!(matches!(err, StoreError::WishlistExists));
    }

    #[test]
    fn test_same_name_for_different_owner_is_allowed() {
        let store = SqliteStore::in_memory().unwrap();

        store
            .save_wishlist(1, "Birthday", "", DisplayType::Public)
            .unwrap();
        let id = store
            .save_wishlist(2, "Birthday", "", DisplayType::Public)
            .unwrap();
        assert!(id > 0);
    }

    #[test]
    fn test_name_over_limit_is_generic_database_error() {
        let store = SqliteStore::in_memory().unwrap();

        let long_name = "x".repeat(101);
        let err = store
            .save_wishlist(1, &long_name, "", DisplayType::None)
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_get_wishlists_returns_owner_rows_only() {
        let store = SqliteStore::in_memory().unwrap();

        store
            .save_wishlist(1, "Birthday", "", DisplayType::Public)
            .unwrap();
        store
            .save_wishlist(1, "Christmas", "", DisplayType::FriendsOnly)
            .unwrap();
        store
            .save_wishlist(2, "Wedding", "", DisplayType::ByLink)
            .unwrap();

        let wishlists = store.get_wishlists(1).unwrap();
        assert_eq!(wishlists.len(), 2);
        assert_eq!(wishlists[0].name, "Birthday");
        assert_eq!(wishlists[1].name, "Christmas");
    }

    #[test]
    fn test_get_wishlists_for_unknown_owner_is_empty() {
        let store = SqliteStore::in_memory().unwrap();

        let wishlists = store.get_wishlists(99).unwrap();
        assert!(wishlists.is_empty());
    }
}
