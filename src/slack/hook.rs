//! Incoming-webhook transport using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::message::SlackMessage;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A Slack message could not be sent.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The webhook URL does not parse.
    #[error("invalid webhook url: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The POST itself failed: connection, timeout, serialization, or a
    /// non-success status from Slack.
    #[error("Slack message could not be sent: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Thin client for a single Slack incoming webhook.
///
/// Each send performs one synchronous POST; there is no retry. Callers decide
/// whether a [`MessagingError`] is worth propagating.
pub struct SlackHook {
    url: Url,
    client: Client,
}

impl std::fmt::Debug for SlackHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Webhook URLs are credentials.
        f.debug_struct("SlackHook").field("url", &"[REDACTED]").finish()
    }
}

impl SlackHook {
    pub fn new(url: &str) -> Result<Self, MessagingError> {
        let url = Url::parse(url).map_err(MessagingError::InvalidUrl)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(MessagingError::Client)?;

        Ok(Self { url, client })
    }

    /// Send a plain-text message.
    pub fn send_plain_text(&self, text: &str) -> Result<(), MessagingError> {
        self.send_payload(&serde_json::json!({ "text": text }))
    }

    /// Send a structured Block Kit message.
    pub fn send_message(&self, message: &SlackMessage) -> Result<(), MessagingError> {
        self.send_payload(message)
    }

    fn send_payload<P: Serialize + ?Sized>(&self, payload: &P) -> Result<(), MessagingError> {
        self.client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(MessagingError::Transport)?;

        Ok(())
    }
}
