use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::{info, warn};

use crate::db::{error::StoreError, models::CredentialRecord, repo::CredentialStore};

/// Credential store backed by a single JSON document holding an array of
/// `{ "username", "password" }` objects.
///
/// Every operation reads the whole document. A successful insert rewrites the
/// whole document through a sibling staging file that is renamed into place.
pub struct JsonFileStore {
    path: PathBuf,
    // Held across the read-modify-write in `insert_if_absent`. Only covers
    // this process; another process writing the same file is not coordinated.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>, create_if_missing: bool) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };

        let exists = fs::try_exists(&store.path)
            .await
            .map_err(|source| store.io_error(source))?;

        if !exists {
            if create_if_missing {
                info!(path = %store.path.display(), "Creating empty credential store");
                store.write_all(&[]).await?;
            } else {
                warn!(
                    path = %store.path.display(),
                    "Credential store does not exist, requests will fail until it is created"
                );
            }
        }

        Ok(store)
    }

    async fn read_all(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;

        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_all(&self, records: &[CredentialRecord]) -> Result<(), StoreError> {
        let serialized =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        let staging = self.staging_path();
        fs::write(&staging, serialized)
            .await
            .map_err(|source| self.io_error(source))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn insert_if_absent(&self, record: CredentialRecord) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await?;
        if records.iter().any(|existing| existing.username == record.username) {
            return Ok(false);
        }

        records.push(record);
        self.write_all(&records).await?;

        Ok(true)
    }

    async fn records_for(&self, username: &str) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = self.read_all().await?;

        Ok(records
            .into_iter()
            .filter(|record| record.username == username)
            .collect())
    }

    async fn all_records(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        self.read_all().await
    }
}
