//! 便捷入口：`FeishuBot` 包装一个客户端，`send_*_message` 每次调用临时创建客户端。

use crate::client::FeishuClient;
use crate::message::{CardConfig, CardHeader, Message, RichTextElement};
use common::SendError;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct FeishuBot {
    client: FeishuClient,
}

impl FeishuBot {
    /// `secret` 为 `None` 或空字符串时不签名
    pub fn new(webhook_url: impl Into<String>, secret: Option<&str>) -> Self {
        Self {
            client: new_client(webhook_url, secret),
        }
    }

    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.client.send_text(text).await
    }

    pub async fn send_rich_text(
        &self,
        title: impl Into<String>,
        lines: Vec<Vec<RichTextElement>>,
    ) -> Result<(), SendError> {
        self.client.send_rich_text(title, lines).await
    }

    pub async fn send_image(&self, image_key: impl Into<String>) -> Result<(), SendError> {
        self.client.send_image(image_key).await
    }

    pub async fn send_interactive(
        &self,
        config: Option<CardConfig>,
        header: Option<CardHeader>,
        elements: Vec<Value>,
    ) -> Result<(), SendError> {
        self.client.send_interactive(config, header, elements).await
    }

    pub async fn send_share_chat(&self, share_chat_id: impl Into<String>) -> Result<(), SendError> {
        self.client.send_share_chat(share_chat_id).await
    }

    pub async fn send_message(&self, message: &Message) -> Result<(), SendError> {
        self.client.send(message).await
    }

    pub fn client(&self) -> &FeishuClient {
        &self.client
    }
}

impl From<FeishuClient> for FeishuBot {
    fn from(client: FeishuClient) -> Self {
        Self { client }
    }
}

fn new_client(webhook_url: impl Into<String>, secret: Option<&str>) -> FeishuClient {
    let client = FeishuClient::new(webhook_url);
    match secret {
        Some(secret) => client.with_secret(secret),
        None => client,
    }
}

pub async fn send_text_message(
    webhook_url: &str,
    text: impl Into<String>,
    secret: Option<&str>,
) -> Result<(), SendError> {
    new_client(webhook_url, secret).send_text(text).await
}

pub async fn send_rich_text_message(
    webhook_url: &str,
    title: impl Into<String>,
    lines: Vec<Vec<RichTextElement>>,
    secret: Option<&str>,
) -> Result<(), SendError> {
    new_client(webhook_url, secret)
        .send_rich_text(title, lines)
        .await
}

pub async fn send_image_message(
    webhook_url: &str,
    image_key: impl Into<String>,
    secret: Option<&str>,
) -> Result<(), SendError> {
    new_client(webhook_url, secret).send_image(image_key).await
}

pub async fn send_interactive_message(
    webhook_url: &str,
    config: Option<CardConfig>,
    header: Option<CardHeader>,
    elements: Vec<Value>,
    secret: Option<&str>,
) -> Result<(), SendError> {
    new_client(webhook_url, secret)
        .send_interactive(config, header, elements)
        .await
}

pub async fn send_share_chat_message(
    webhook_url: &str,
    share_chat_id: impl Into<String>,
    secret: Option<&str>,
) -> Result<(), SendError> {
    new_client(webhook_url, secret)
        .send_share_chat(share_chat_id)
        .await
}
