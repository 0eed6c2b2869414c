use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("failed to read admin credentials: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed admin credentials file: {0}")]
    Json(#[from] serde_json::Error),
}

/// The single admin account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    /// Read on every login attempt so edits apply without a restart.
    pub fn load(path: &Path) -> Result<Self, CredentialsError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
