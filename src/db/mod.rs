pub mod error;
pub mod json_file;
pub mod models;
pub mod repo;
pub mod sqlite;

pub use error::StoreError;
pub use models::CredentialRecord;
pub use repo::{CredentialStore, StoreLocation, open_store};
