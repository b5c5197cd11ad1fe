use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("relay request failed: {0}")]
    Transport(String),

    #[error("relay returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound mail seam. Production talks to an HTTP relay; tests drop in
/// recording fakes.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

pub struct RelayMailer {
    client: Client,
    relay_url: String,
}

impl RelayMailer {
    pub fn new(relay_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, relay_url }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let message = RelayMessage { to, subject, body };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Fire-and-forget admin channel. Delivery problems are logged and dropped;
/// nothing here may abort the calling pass.
pub async fn notify_admin(mailer: &dyn Mailer, admin: Option<&str>, subject: &str, body: &str) {
    let admin = match admin {
        Some(a) => a,
        None => {
            warn!("Admin notification dropped (no ADMIN_EMAIL configured): {}", subject);
            return;
        }
    };

    if let Err(e) = mailer.send(admin, subject, body).await {
        error!("Admin notification failed: {}", e);
    }
}
