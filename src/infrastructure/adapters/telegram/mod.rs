//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::entities::{self, CommandKind, ReplyPayload};
use crate::domain::traits::{Bot, BotInfo};

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Message {
    /// Convert into the platform-neutral message
    pub fn to_domain(&self) -> entities::Message {
        let chat_id = self.chat.id.to_string();
        let mut message = entities::Message::new(&chat_id, self.message_id.to_string());
        message.is_group = matches!(self.chat.kind.as_str(), "group" | "supergroup");
        message.text = self.text.clone();
        message.caption = self.caption.clone();
        message.reply_to = self.reply_to_message.as_ref().map(|m| Box::new(m.to_domain()));
        message
    }
}

/// Bot API response envelope
#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn with_api_base(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "lingo-bot".to_string(),
                username: "lingo_bot".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// POST a Bot API method and unwrap the response envelope
    async fn call<Req, Res>(&self, method: &str, request: &Req, timeout: Option<Duration>) -> Result<Res, BotError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut builder = self.client.post(self.api_url(method)).json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let data: ApiResponse<Res> = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                return Err(BotError::Api { status: status.as_u16(), description: body });
            }
            Err(e) => return Err(BotError::Parse(e.to_string())),
        };

        if !status.is_success() || !data.ok {
            return Err(BotError::Api {
                status: status.as_u16(),
                description: data.description.unwrap_or_default(),
            });
        }

        data.result.ok_or_else(|| BotError::Parse(format!("{} returned no result", method)))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: Option<String>,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({}), None).await?;

        self.info = BotInfo {
            id: data.id.to_string(),
            name: data.first_name,
            username: data.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Long-poll for updates using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        // Leave headroom over the server-side long-poll timeout
        let http_timeout = Duration::from_secs(timeout + 10);
        self.call("getUpdates", &request, Some(http_timeout)).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }

    /// Send a message with specific parse mode
    pub async fn send_message_with_format(
        &self,
        chat_id: &str,
        text: &str,
        parse_mode: Option<&str>,
        reply_to: Option<&str>,
    ) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct ReplyParameters {
            message_id: i64,
            allow_sending_without_reply: bool,
        }

        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reply_parameters: Option<ReplyParameters>,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        let reply_parameters = reply_to
            .and_then(|id| id.parse().ok())
            .map(|message_id| ReplyParameters { message_id, allow_sending_without_reply: true });

        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            reply_parameters,
        };

        let result: MessageResult = self.call("sendMessage", &request, None).await?;
        Ok(result.message_id.to_string())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: &'static str,
            description: &'static str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let commands = CommandKind::ALL
            .iter()
            .map(|kind| Command { command: kind.name(), description: kind.description() })
            .collect();

        let _: bool = self.call("setMyCommands", &SetMyCommandsRequest { commands }, None).await?;

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_reply(&self, chat_id: &str, reply: &ReplyPayload, reply_to: Option<&str>) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, reply.text());

        let Some(mode) = reply.parse_mode() else {
            return self.send_message_with_format(chat_id, reply.text(), None, reply_to).await;
        };

        match self.send_message_with_format(chat_id, reply.text(), Some(mode.as_str()), reply_to).await {
            Err(e) if e.is_bad_request() => {
                // Fallback to plain text
                tracing::warn!("{} rejected, using plain text: {}", mode.as_str(), e);
                self.send_message_with_format(chat_id, reply.text(), None, reply_to).await
            }
            result => result,
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
