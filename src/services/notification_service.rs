use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bot api answered {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> std::result::Result<(), SendError>;
}

/// Telegram Bot API `sendMessage` transport.
pub struct TelegramSender {
    client: Client,
    api_url: String,
    bot_token: String,
}

impl TelegramSender {
    pub fn new(client: Client, api_url: String, bot_token: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token,
        }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> std::result::Result<(), SendError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.bot_token);
        let body = json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SendError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Best-effort, at-most-once push notifications.
///
/// Delivery runs on a spawned task, so callers never wait on the bot API and
/// never see its failures; those are logged and dropped.
#[derive(Clone)]
pub struct NotificationService {
    sender: Option<Arc<dyn MessageSender>>,
}

impl NotificationService {
    pub fn new(sender: Option<Arc<dyn MessageSender>>) -> Self {
        Self { sender }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let Some(token) = config.telegram_bot_token.clone() else {
            tracing::info!("TELEGRAM_BOT_TOKEN not set, notifications disabled");
            return Ok(Self::new(None));
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.telegram_timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("http client: {}", e)))?;
        let sender = TelegramSender::new(client, config.telegram_api_url.clone(), token);
        Ok(Self::new(Some(Arc::new(sender))))
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Returns the delivery task when one was started, `None` when skipped.
    pub fn dispatch(&self, chat_id: Option<&str>, text: impl Into<String>) -> Option<JoinHandle<()>> {
        let Some(sender) = self.sender.clone() else {
            tracing::debug!("notification skipped: no bot token configured");
            return None;
        };
        let Some(chat_id) = chat_id.map(str::trim).filter(|c| !c.is_empty()) else {
            tracing::debug!("notification skipped: recipient has no chat id");
            return None;
        };

        let chat_id = chat_id.to_string();
        let text = text.into();
        Some(tokio::spawn(async move {
            match sender.send_message(&chat_id, &text).await {
                Ok(()) => tracing::info!(chat_id = %chat_id, "notification delivered"),
                Err(err) => tracing::warn!(
                    chat_id = %chat_id,
                    error = %err,
                    "notification dropped"
                ),
            }
        }))
    }
}
