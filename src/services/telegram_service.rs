use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use crate::error::{Error, Result};
use crate::models::outbound::OutboundMessage;
use crate::models::telegram::{ApiResponse, ChatMember, Update, User, WebhookInfo};

/// Outbound side of the chat platform, as seen by handlers and the broadcast.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: i64, message: &OutboundMessage) -> Result<()>;

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        message: &OutboundMessage,
    ) -> Result<()>;

    async fn answer_callback(&self, query_id: &str) -> Result<()>;

    async fn chat_administrators(&self, chat: &str) -> Result<Vec<ChatMember>>;
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    /// `api_url` is the Bot API host, e.g. `https://api.telegram.org`.
    /// `poll_timeout_secs` bounds long polling; the HTTP timeout sits above it.
    pub fn new(api_url: &str, bot_token: &str, poll_timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &JsonValue) -> Result<T> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| Error::Transport {
            method: method.to_string(),
            description: format!("invalid response (HTTP {}): {}", status, e),
        })?;

        if !envelope.ok {
            return Err(Error::Transport {
                method: method.to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("error code {:?}", envelope.error_code)),
            });
        }

        envelope.result.ok_or_else(|| Error::Transport {
            method: method.to_string(),
            description: "missing result".to_string(),
        })
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &json!({})).await
    }

    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call("getWebhookInfo", &json!({})).await
    }

    pub async fn set_webhook(&self, url: &str, secret: Option<&str>) -> Result<()> {
        let mut body = json!({
            "url": url,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(secret) = secret {
            body["secret_token"] = json!(secret);
        }
        let _: bool = self.call("setWebhook", &body).await?;
        Ok(())
    }

    pub async fn delete_webhook(&self) -> Result<()> {
        let _: bool = self.call("deleteWebhook", &json!({})).await?;
        Ok(())
    }
}

/// Builds the common body shared by `sendMessage` and `editMessageText`.
pub fn message_body(chat_id: i64, message: &OutboundMessage) -> JsonValue {
    let mut body = json!({
        "chat_id": chat_id,
        "text": message.text,
        "parse_mode": "Markdown",
    });
    if message.disable_preview {
        body["disable_web_page_preview"] = json!(true);
    }
    if let Some(keyboard) = &message.keyboard {
        body["reply_markup"] = json!(keyboard);
    }
    body
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(&self, chat_id: i64, message: &OutboundMessage) -> Result<()> {
        tracing::debug!(chat_id, "Sending Telegram message");
        let _: JsonValue = self
            .call("sendMessage", &message_body(chat_id, message))
            .await?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        message: &OutboundMessage,
    ) -> Result<()> {
        let mut body = message_body(chat_id, message);
        body["message_id"] = json!(message_id);
        // Returns the edited Message, or `true` for inline messages.
        let _: JsonValue = self.call("editMessageText", &body).await?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<()> {
        let _: bool = self
            .call("answerCallbackQuery", &json!({ "callback_query_id": query_id }))
            .await?;
        Ok(())
    }

    async fn chat_administrators(&self, chat: &str) -> Result<Vec<ChatMember>> {
        self.call("getChatAdministrators", &json!({ "chat_id": chat }))
            .await
    }
}
