//! User registry: the `users` table in a local SQLite file.
//!
//! Every operation opens its own connection and drops it before returning, so
//! no connection state is shared across calls. SQLite work is blocking and
//! runs on tokio's blocking pool.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use rusqlite::{params, Connection, OptionalExtension};

use crate::{domain::ChatId, errors::Error, Result};

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    chat_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)";

#[derive(Clone, Debug)]
pub struct UserRegistry {
    path: Arc<PathBuf>,
}

impl UserRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `users` table if absent. Existing rows are left untouched.
    pub async fn initialize(&self) -> Result<()> {
        let path = self.path.clone();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        self.with_connection(|conn| {
            conn.execute(CREATE_USERS_TABLE, [])?;
            Ok(())
        })
        .await?;

        tracing::debug!(path = %path.display(), "user registry initialized");
        Ok(())
    }

    /// Register `chat_id` under `name` unless it is already known.
    ///
    /// Returns `true` if the user was added, `false` if the chat id already
    /// existed (the stored name is not changed). The insert is a single
    /// conditional statement, so concurrent registrations of the same chat id
    /// yield exactly one `true`.
    pub async fn register(&self, chat_id: ChatId, name: &str) -> Result<bool> {
        if name.trim().is_empty() {
            return Err(Error::Validation("user name must not be empty".to_string()));
        }
        let name = name.to_string();

        let inserted = self
            .with_connection(move |conn| {
                let changed = conn.execute(
                    "INSERT OR IGNORE INTO users (chat_id, name) VALUES (?1, ?2)",
                    params![chat_id.0, name],
                )?;
                Ok(changed == 1)
            })
            .await?;

        if inserted {
            tracing::info!(chat_id = chat_id.0, "registered new user");
        }
        Ok(inserted)
    }

    /// All registered names, ordered by chat id.
    pub async fn list_all(&self) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT name FROM users ORDER BY chat_id")?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })
        .await
    }

    pub async fn lookup(&self, chat_id: ChatId) -> Result<Option<String>> {
        self.with_connection(move |conn| {
            let name = conn
                .query_row(
                    "SELECT name FROM users WHERE chat_id = ?1",
                    params![chat_id.0],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(name)
        })
        .await
    }

    pub async fn count(&self) -> Result<usize> {
        self.with_connection(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(n.max(0) as usize)
        })
        .await
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(path.as_path())?;
            f(&conn)
        })
        .await
        .map_err(|e| Error::External(format!("registry task join error: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh_registry() -> (tempfile::TempDir, UserRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("bot_data.db"));
        registry.initialize().await.unwrap();
        (dir, registry)
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let (_dir, registry) = fresh_registry().await;
        assert!(registry.list_all().await.unwrap().is_empty());
        assert_eq!(registry.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn re_registration_keeps_first_name() {
        let (_dir, registry) = fresh_registry().await;

        assert!(registry.register(ChatId(1), "Alice").await.unwrap());
        assert!(!registry.register(ChatId(1), "Alicia").await.unwrap());

        assert_eq!(
            registry.lookup(ChatId(1)).await.unwrap().as_deref(),
            Some("Alice")
        );
        assert_eq!(registry.list_all().await.unwrap(), vec!["Alice".to_string()]);
    }

    #[tokio::test]
    async fn lists_every_registered_user_once() {
        let (_dir, registry) = fresh_registry().await;

        assert!(registry.register(ChatId(2), "Bob").await.unwrap());
        assert!(registry.register(ChatId(1), "Alice").await.unwrap());
        assert!(!registry.register(ChatId(2), "Bob").await.unwrap());

        assert_eq!(
            registry.list_all().await.unwrap(),
            vec!["Alice".to_string(), "Bob".to_string()]
        );
        assert_eq!(registry.count().await.unwrap(), 2);
        assert_eq!(registry.lookup(ChatId(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let (_dir, registry) = fresh_registry().await;
        registry.register(ChatId(-100123), "Group").await.unwrap();

        registry.initialize().await.unwrap();
        registry.initialize().await.unwrap();

        assert_eq!(registry.list_all().await.unwrap(), vec!["Group".to_string()]);
    }

    #[tokio::test]
    async fn initialize_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("nested/data/bot_data.db"));
        registry.initialize().await.unwrap();
        assert!(registry.path().exists());
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let (_dir, registry) = fresh_registry().await;
        let err = registry.register(ChatId(1), "   ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stores_name_exactly_as_given() {
        let (_dir, registry) = fresh_registry().await;
        assert!(registry.register(ChatId(1), " Alice ").await.unwrap());
        assert_eq!(registry.list_all().await.unwrap(), vec![" Alice ".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_registration_adds_once() {
        let (_dir, registry) = fresh_registry().await;

        let mut tasks = Vec::new();
        for i in 0..8 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                registry.register(ChatId(42), &format!("user-{i}")).await
            }));
        }

        let mut added = 0;
        for t in tasks {
            if t.await.unwrap().unwrap() {
                added += 1;
            }
        }

        assert_eq!(added, 1);
        assert_eq!(registry.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_table_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = UserRegistry::new(dir.path().join("bot_data.db"));
        let err = registry.list_all().await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
