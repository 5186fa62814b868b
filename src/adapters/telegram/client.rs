//! Telegram Bot API notifier
//!
//! Sends each digest with `sendMessage` in MarkdownV2. When the API answers
//! `ok: false` (usually a markup parse error) the message is resent once as
//! plain text with markup characters stripped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::digest::MARKDOWN_RESERVED;
use crate::ports::{AlertSink, DeliveryReceipt, NotifierError};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Credentials and endpoint for the bot
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Remove every MarkdownV2 reserved character, backslashes included
pub fn strip_markup(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\\' && !MARKDOWN_RESERVED.contains(c))
        .collect()
}

pub struct TelegramNotifier {
    config: TelegramConfig,
    http: Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self, NotifierError> {
        if config.bot_token.trim().is_empty() {
            return Err(NotifierError::NotConfigured("bot token is empty".to_string()));
        }
        if config.chat_id.trim().is_empty() {
            return Err(NotifierError::NotConfigured("chat id is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifierError::Http(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// POST one sendMessage call. `Ok(Err(reason))` means the API said `ok: false`.
    async fn send(&self, request: &SendMessageRequest<'_>) -> Result<Result<(), String>, NotifierError> {
        let response = self
            .http
            .post(self.config.send_message_url())
            .json(request)
            .send()
            .await
            .map_err(|e| NotifierError::Http(redact(&e.to_string(), &self.config.bot_token)))?;

        let status = response.status();
        match response.json::<ApiResponse>().await {
            Ok(body) if body.ok => Ok(Ok(())),
            Ok(body) => Ok(Err(body
                .description
                .unwrap_or_else(|| format!("status {}", status.as_u16())))),
            Err(_) => Ok(Err(format!("status {} with unreadable body", status.as_u16()))),
        }
    }
}

#[async_trait]
impl AlertSink for TelegramNotifier {
    async fn deliver(&self, message: &str) -> Result<DeliveryReceipt, NotifierError> {
        let formatted = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text: message,
            parse_mode: Some("MarkdownV2"),
            disable_web_page_preview: true,
        };

        let reason = match self.send(&formatted).await? {
            Ok(()) => return Ok(DeliveryReceipt::Formatted),
            Err(reason) => reason,
        };
        tracing::warn!("Telegram rejected formatted message: {}; retrying as plain text", reason);

        let plain_text = strip_markup(message);
        let plain = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text: &plain_text,
            parse_mode: None,
            disable_web_page_preview: true,
        };

        match self.send(&plain).await? {
            Ok(()) => Ok(DeliveryReceipt::PlainFallback),
            Err(reason) => Err(NotifierError::Rejected(reason)),
        }
    }
}

/// Keep the bot token out of error strings (reqwest errors include the URL)
fn redact(text: &str, token: &str) -> String {
    if token.is_empty() {
        text.to_string()
    } else {
        text.replace(token, "<redacted>")
    }
}
