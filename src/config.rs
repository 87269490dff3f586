use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::{accounts::password::PasswordScheme, db::StoreLocation};

#[derive(Error, Debug)]
#[error("Invalid value `{value}` for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    pub password_scheme: PasswordScheme,
    pub create_store: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load(&lookup, "AUTH_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "AUTH_PORT", "3003")?,
            store: try_load(&lookup, "AUTH_STORE", "users.json")?,
            password_scheme: try_load(&lookup, "AUTH_PASSWORD_SCHEME", "plaintext")?,
            create_store: try_load(&lookup, "AUTH_CREATE_STORE", "true")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
