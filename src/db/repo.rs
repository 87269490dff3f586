use std::{convert::Infallible, path::PathBuf, str::FromStr, sync::Arc};

use async_trait::async_trait;

use crate::db::{
    error::StoreError, json_file::JsonFileStore, models::CredentialRecord, sqlite::SqliteStore,
};

/// Persisted sequence of credential records.
///
/// Domain outcomes are plain values: a taken username makes
/// [`insert_if_absent`](CredentialStore::insert_if_absent) return `Ok(false)`.
/// `Err` is reserved for the store itself being unreachable or corrupt.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Appends `record` unless a record with the same username exists.
    async fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool, StoreError>;

    /// Every record whose username equals `username` exactly, in insertion order.
    async fn records_for(&self, username: &str) -> Result<Vec<CredentialRecord>, StoreError>;

    /// The full sequence, in insertion order.
    async fn all_records(&self) -> Result<Vec<CredentialRecord>, StoreError>;
}

/// Where the credential store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    JsonFile(PathBuf),
    Sqlite(String),
}

impl FromStr for StoreLocation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("sqlite:") {
            Ok(Self::Sqlite(s.to_string()))
        } else {
            Ok(Self::JsonFile(PathBuf::from(s)))
        }
    }
}

pub async fn open_store(
    location: &StoreLocation,
    create_if_missing: bool,
) -> Result<Arc<dyn CredentialStore>, StoreError> {
    let store: Arc<dyn CredentialStore> = match location {
        StoreLocation::JsonFile(path) => {
            Arc::new(JsonFileStore::open(path.clone(), create_if_missing).await?)
        }
        StoreLocation::Sqlite(url) => Arc::new(SqliteStore::connect(url, create_if_missing).await?),
    };

    Ok(store)
}
