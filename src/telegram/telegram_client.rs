//! Minimal Telegram Bot API client.
//!
//! Covers exactly the calls the update loop needs: `getMe` as a startup
//! connectivity check, `getUpdates` long-polling, and `sendMessage`.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org/bot";
/// Timeout for non-polling Telegram API calls (seconds).
const API_TIMEOUT_SECS: u64 = 30;

/// Telegram transport configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    pub bot_token: String,
    /// Long-polling timeout in seconds (default: 30).
    pub polling_timeout: u32,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            polling_timeout: 30,
        }
    }

    pub fn with_polling_timeout(mut self, timeout: u32) -> Self {
        self.polling_timeout = timeout;
        self
    }
}

pub struct TelegramClient {
    config: TelegramConfig,
    client: Client,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}{}/{}", TELEGRAM_API_BASE, self.config.bot_token, method)
    }

    fn unwrap_envelope<T>(body: TelegramResponse<T>) -> Result<T> {
        if body.ok {
            body.result
                .ok_or_else(|| anyhow!("Telegram returned ok but no result"))
        } else {
            Err(anyhow!(
                "Telegram API error: {}",
                body.description.unwrap_or_default()
            ))
        }
    }

    /// Identify the bot account; fails fast on a bad token.
    pub async fn get_me(&self) -> Result<BotProfile> {
        let response = self
            .client
            .get(self.api_url("getMe"))
            .timeout(std::time::Duration::from_secs(API_TIMEOUT_SECS))
            .send()
            .await?;

        Self::unwrap_envelope(response.json().await?)
    }

    /// Long-poll for new updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<TelegramUpdate>> {
        let params = serde_json::json!({
            "offset": offset,
            "timeout": self.config.polling_timeout,
            "allowed_updates": ["message"],
        });

        let response = self
            .client
            .post(self.api_url("getUpdates"))
            .json(&params)
            // Leave headroom past the server-side long-poll window.
            .timeout(std::time::Duration::from_secs(
                self.config.polling_timeout as u64 + 10,
            ))
            .send()
            .await?;

        Self::unwrap_envelope(response.json().await?)
    }

    /// Send a plain-text reply to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let params = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&params)
            .timeout(std::time::Duration::from_secs(API_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(anyhow!("Telegram HTTP error: {}", error));
        }

        let body: TelegramResponse<SentMessage> = response.json().await?;
        Self::unwrap_envelope(body)?;
        Ok(())
    }
}

// ============================================================================
// Telegram API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct TelegramResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    #[allow(dead_code)]
    pub message_id: i64,
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    #[allow(dead_code)]
    pub id: i64,
    pub is_bot: bool,
    #[allow(dead_code)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
}

/// Result of `getMe`.
#[derive(Debug, Deserialize)]
pub struct BotProfile {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    #[allow(dead_code)]
    message_id: i64,
}
