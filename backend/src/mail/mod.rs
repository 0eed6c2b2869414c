//! Outgoing e-mail.
//!
//! Handlers talk to a [`Mailer`] trait object held in the application state.
//! [`HttpMailer`] posts to a transactional e-mail HTTP API; [`LogMailer`]
//! only logs and is used when no API key is configured.

pub mod templates;

use crate::config::MailConfig;
use async_trait::async_trait;
use log::info;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("mail API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail API rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Builds the mailer matching the configuration.
pub fn from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    match &config.api_key {
        Some(key) => Arc::new(HttpMailer::new(config.api_url.clone(), key.clone())),
        None => Arc::new(LogMailer),
    }
}

pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Sent '{}' to {}", message.subject, message.to);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(
            "Mail delivery disabled, would send '{}' from {} to {}",
            message.subject, message.from, message.to
        );
        Ok(())
    }
}
