use std::{fmt, str::FromStr};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// How the `password` field of a credential record relates to the secret the
/// user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Stored verbatim, compared with `==`.
    #[default]
    Plaintext,
    /// Stored as an Argon2id PHC string with a random salt.
    Argon2,
}

impl PasswordScheme {
    /// Produces the value to persist for `password`.
    pub fn seal(self, password: &str) -> Result<String, argon2::password_hash::Error> {
        match self {
            Self::Plaintext => Ok(password.to_string()),
            Self::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
                Ok(hash.to_string())
            }
        }
    }
}

/// Whether `candidate` is the secret behind the persisted `stored` value.
///
/// The format is read from `stored` itself, not from the configured scheme,
/// so records written under either scheme keep working after a switch. A
/// value that parses as a PHC string is only ever checked as a hash.
pub fn verify(stored: &str, candidate: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => stored == candidate,
    }
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plaintext" => Ok(Self::Plaintext),
            "argon2" => Ok(Self::Argon2),
            other => Err(format!(
                "unknown password scheme `{other}`, expected `plaintext` or `argon2`"
            )),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext => write!(f, "plaintext"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}
