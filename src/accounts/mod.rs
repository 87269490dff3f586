//! Register and login over a [`CredentialStore`].
//!
//! Both operations answer with a plain success flag. A taken username and a
//! wrong password are `Ok(false)`; only a store fault or a hashing failure is
//! an error.

pub mod password;

use std::sync::Arc;

use thiserror::Error;
use tokio::task;
use tracing::{debug, info};

use crate::db::{CredentialRecord, CredentialStore, StoreError};
use password::PasswordScheme;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn CredentialStore>,
    scheme: PasswordScheme,
}

impl Accounts {
    pub fn new(store: Arc<dyn CredentialStore>, scheme: PasswordScheme) -> Self {
        Self { store, scheme }
    }

    /// Adds `username` unless it is already taken. The existing record is
    /// never touched on conflict.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, AccountError> {
        // Cheap early rejection; `insert_if_absent` still decides races.
        if !self.store.records_for(username).await?.is_empty() {
            info!(username, "Registration rejected, username taken");
            return Ok(false);
        }

        let scheme = self.scheme;
        let password = password.to_owned();
        let sealed = off_executor(move || scheme.seal(&password))
            .await?
            .map_err(|e| AccountError::Hash(e.to_string()))?;

        let created = self
            .store
            .insert_if_absent(CredentialRecord::new(username, sealed))
            .await?;

        if created {
            info!(username, "Registered user");
        } else {
            info!(username, "Registration rejected, username taken");
        }

        Ok(created)
    }

    /// True iff a record for `username` holds `password`.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, AccountError> {
        let records = self.store.records_for(username).await?;

        let matched = if records.is_empty() {
            false
        } else {
            let candidate = password.to_owned();
            off_executor(move || {
                records
                    .iter()
                    .any(|record| password::verify(&record.password, &candidate))
            })
            .await?
        };

        debug!(username, matched, "Login attempt");

        Ok(matched)
    }
}

/// Argon2 costs tens of milliseconds of CPU per call; keep it off the async
/// worker threads.
async fn off_executor<T, F>(work: F) -> Result<T, AccountError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| AccountError::Hash(e.to_string()))
}
