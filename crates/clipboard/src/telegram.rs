use async_trait::async_trait;
use serde::Serialize;
use viewzenix_core::clipboard::error::ClipboardError;
use viewzenix_core::clipboard::port::ClipboardSink;

/// # Summary
/// Delivers copied text to a Telegram chat so it can be pasted from any device.
///
/// # Invariants
/// * `bot_token` must be valid.
/// * `chat_id` must be accessible by the bot.
pub struct TelegramClipboard {
    /// The Bot API token.
    bot_token: String,
    /// The target Chat ID.
    chat_id: String,
    /// The HTTP client used for requests.
    client: reqwest::Client,
    api_base: String,
}

/// Payload structure for Telegram `sendMessage` API.
#[derive(Serialize)]
struct TelegramMessage {
    chat_id: String,
    text: String,
    parse_mode: String,
}

impl TelegramClipboard {
    /// # Summary
    /// Creates a new `TelegramClipboard` pointed at the public Bot API.
    ///
    /// # Arguments
    /// * `bot_token` - The Telegram Bot API token.
    /// * `chat_id` - The target chat ID to send messages to.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self::with_api_base(bot_token, chat_id, "https://api.telegram.org")
    }

    /// Same as [`TelegramClipboard::new`] but against a custom Bot API host.
    pub fn with_api_base(bot_token: String, chat_id: String, api_base: &str) -> Self {
        Self {
            bot_token,
            chat_id,
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// # Logic
    /// Wraps the text in an HTML `<pre>` block so JSON keeps its layout and
    /// can be copied with one tap. `<`, `>` and `&` are escaped.
    fn format(text: &str) -> String {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        format!("<pre>{}</pre>", escaped)
    }
}

#[async_trait]
impl ClipboardSink for TelegramClipboard {
    /// # Summary
    /// Sends the text to the configured Telegram chat.
    ///
    /// # Logic
    /// 1. Constructs the Telegram API URL.
    /// 2. Formats the text as a preformatted block.
    /// 3. Sends a POST request to the Telegram API.
    /// 4. Checks the response status and returns success or failure.
    ///
    /// # Returns
    /// * `Ok(())` if the message was sent successfully.
    /// * `Err(ClipboardError)` if a network error occurs or the API returns a non-success status.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.bot_token.is_empty() || self.chat_id.is_empty() {
            return Err(ClipboardError::Config(
                "Telegram bot token and chat id are required".to_string(),
            ));
        }

        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = TelegramMessage {
            chat_id: self.chat_id.clone(),
            text: Self::format(text),
            parse_mode: "HTML".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClipboardError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClipboardError::Platform(format!(
                "Telegram API error: {}",
                error_text
            )));
        }

        tracing::debug!(chat_id = %self.chat_id, "Text delivered to Telegram");
        Ok(())
    }
}
