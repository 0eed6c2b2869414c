//! Runtime configuration, read from environment variables.
//!
//! Every setting has a default so the server starts with no environment at
//! all; unset keys are logged at `info`, unparsable ones are a hard
//! [`ConfigError`] at start-up.

use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    /// No key means e-mails are only logged.
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub registrations_file: String,
    pub inquiries_file: String,
    pub credentials_file: String,
    pub models_file: String,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub mail: MailConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_ttl_secs: u64 = try_load(&lookup, "SESSION_TTL_SECS", "86400")?;
        if session_ttl_secs == 0 || session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_SECS".to_string(),
                reason: format!("must be between 1 and {}", MAX_SESSION_TTL_SECS),
            });
        }

        let api_key = lookup("MAIL_API_KEY").filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("MAIL_API_KEY not set, outgoing e-mails will only be logged");
        }

        Ok(Self {
            host: try_load(&lookup, "APP_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "APP_PORT", "9002")?,
            data_dir: try_load(&lookup, "APP_DATA_DIR", ".")?,
            registrations_file: try_load(&lookup, "REGISTRATIONS_FILE", "registrations.csv")?,
            inquiries_file: try_load(&lookup, "INQUIRIES_FILE", "inquiries.csv")?,
            credentials_file: try_load(&lookup, "ADMIN_CREDENTIALS_FILE", "admin-credentials.json")?,
            models_file: try_load(&lookup, "MODELS_FILE", "models.json")?,
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_secure: try_load(&lookup, "COOKIE_SECURE", "false")?,
            mail: MailConfig {
                api_url: try_load(&lookup, "MAIL_API_URL", "https://api.resend.com/emails")?,
                api_key,
                from: try_load(&lookup, "MAIL_FROM", "GlamHunt <onboarding@glamhunt.app>")?,
            },
        })
    }

    pub fn registrations_path(&self) -> PathBuf {
        self.data_dir.join(&self.registrations_file)
    }

    pub fn inquiries_path(&self) -> PathBuf {
        self.data_dir.join(&self.inquiries_file)
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(&self.credentials_file)
    }

    pub fn models_path(&self) -> PathBuf {
        self.data_dir.join(&self.models_file)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}
