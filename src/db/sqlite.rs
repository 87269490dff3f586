use std::{
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::db::{error::StoreError, models::CredentialRecord, repo::CredentialStore};

/// Credential store backed by SQLite. Username uniqueness is a table
/// constraint, so registration is a single atomic put-if-absent.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str, create_if_missing: bool) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(create_if_missing);

        // Every connection to `:memory:` opens its own database.
        let in_memory = url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
        if in_memory {
            pool_options = pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;
        create_credentials_table(&pool).await?;

        info!(url, "Connected to SQLite credential store");

        Ok(Self { pool })
    }
}

async fn create_credentials_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS credentials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO credentials (username, password, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(&record.username)
        .bind(&record.password)
        .bind(unix_now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn records_for(&self, username: &str) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = sqlx::query_as::<_, CredentialRecord>(
            "SELECT username, password FROM credentials WHERE username = ? ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn all_records(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = sqlx::query_as::<_, CredentialRecord>(
            "SELECT username, password FROM credentials ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", true).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_if_absent() {
        let store = memory_store().await;

        assert!(store.insert_if_absent(CredentialRecord::new("alice", "pw1")).await.unwrap());
        assert!(!store.insert_if_absent(CredentialRecord::new("alice", "pw2")).await.unwrap());

        assert_eq!(
            store.records_for("alice").await.unwrap(),
            vec![CredentialRecord::new("alice", "pw1")]
        );
    }

    #[tokio::test]
    async fn test_username_comparison_is_case_sensitive() {
        let store = memory_store().await;

        assert!(store.insert_if_absent(CredentialRecord::new("alice", "pw")).await.unwrap());
        assert!(store.insert_if_absent(CredentialRecord::new("ALICE", "pw")).await.unwrap());

        assert!(store.records_for("Alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_keep_insertion_order() {
        let store = memory_store().await;
        for name in ["zed", "amy", "mo"] {
            store
                .insert_if_absent(CredentialRecord::new(name, "pw"))
                .await
                .unwrap();
        }

        let names: Vec<_> = store
            .all_records()
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.username)
            .collect();
        assert_eq!(names, ["zed", "amy", "mo"]);
    }

    #[tokio::test]
    async fn test_records_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("users.db").display());

        {
            let store = SqliteStore::connect(&url, true).await.unwrap();
            store
                .insert_if_absent(CredentialRecord::new("alice", "pw1"))
                .await
                .unwrap();
            store.pool.close().await;
        }

        let store = SqliteStore::connect(&url, false).await.unwrap();
        assert_eq!(
            store.all_records().await.unwrap(),
            vec![CredentialRecord::new("alice", "pw1")]
        );
    }

    #[tokio::test]
    async fn test_missing_database_without_create_fails() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("absent.db").display());

        assert!(matches!(
            SqliteStore::connect(&url, false).await,
            Err(StoreError::Database(_))
        ));
    }
}
