// src/services/notify.rs

//! Message delivery.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::TelegramConfig;
use crate::services::message::Message;

/// Delivers messages somewhere a human will read them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<()>;
}

/// Sends messages through the Telegram Bot API.
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: Client, api_base: &str, token: &str, chat_id: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
            chat_id: chat_id.to_string(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &Message) -> Result<()> {
        let mut form = vec![
            ("chat_id", self.chat_id.as_str()),
            ("text", message.text.as_str()),
        ];
        if message.markdown {
            form.push(("parse_mode", "Markdown"));
        }

        // The endpoint embeds the bot token, so keep it out of error text.
        self.client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::notify(e.without_url()))?;

        log::debug!("Telegram message delivered ({} bytes)", message.text.len());
        Ok(())
    }
}

/// Writes messages to the log instead of sending them.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, message: &Message) -> Result<()> {
        log::info!("Message (not sent):\n{}", message.text);
        Ok(())
    }
}

/// Pick a notifier: Telegram when credentials exist and this is not a dry run.
pub fn build_notifier(config: &TelegramConfig, client: &Client, dry_run: bool) -> Box<dyn Notifier> {
    if dry_run {
        log::info!("Dry run: messages will be logged only");
        return Box::new(ConsoleNotifier);
    }
    match config.credentials() {
        Some((token, chat_id)) => Box::new(TelegramNotifier::new(
            client.clone(),
            &config.api_base,
            token,
            chat_id,
        )),
        None => {
            log::warn!("Telegram credentials missing; messages will be logged only");
            Box::new(ConsoleNotifier)
        }
    }
}
