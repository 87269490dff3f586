use serde::{Deserialize, Serialize};

/// A stored username/password pair.
///
/// `password` holds whatever the active [`PasswordScheme`](crate::accounts::password::PasswordScheme)
/// produced: the secret itself for plaintext, a PHC string for argon2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
