//! Message delivery via the Telegram Bot API
//!
//! A form-encoded POST to the sendMessage endpoint. Only the HTTP status
//! is inspected; the response body is ignored.

use crate::infra::config::Config;
use crate::io::Notifier;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramNotifier {
    api_url: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for Telegram")?;

        Ok(Self {
            api_url: send_message_url(config.bot_token()),
            chat_id: config.chat_id().to_string(),
            client,
        })
    }
}

fn send_message_url(bot_token: &str) -> String {
    format!("https://api.telegram.org/bot{}/sendMessage", bot_token)
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> anyhow::Result<()> {
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "Markdown"),
        ];

        // The api_url embeds the bot token, so it must never be logged
        self.client
            .post(&self.api_url)
            .form(&params)
            .send()
            .await
            .context("Telegram request failed")?
            .error_for_status()
            .context("Telegram API returned an error status")?;

        debug!(chat_id = %self.chat_id, bytes = text.len(), "message_delivered");
        Ok(())
    }
}
