use crate::message::{CardConfig, CardHeader, Message, RichTextElement};
use crate::sign::gen_sign;
use chrono::Utc;
use common::SendError;
use log::*;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// 实际发送的请求体
///
/// 未配置密钥时 `timestamp`、`sign` 两个字段整个不出现。
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEnvelope<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    #[serde(flatten)]
    pub message: &'a Message,
}

impl<'a> WebhookEnvelope<'a> {
    pub fn unsigned(message: &'a Message) -> Self {
        Self {
            timestamp: None,
            sign: None,
            message,
        }
    }

    pub fn signed(message: &'a Message, secret: &str, timestamp: i64) -> Self {
        Self {
            timestamp: Some(timestamp.to_string()),
            sign: Some(gen_sign(secret, timestamp)),
            message,
        }
    }
}

/// 飞书自定义机器人客户端
///
/// 只持有 webhook 地址和可选密钥，调用之间不保存任何状态，可以在多个任务间克隆共享。
#[derive(Clone)]
pub struct FeishuClient {
    webhook_url: String,
    secret: Option<String>,
    http_client: reqwest::Client,
}

impl fmt::Debug for FeishuClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeishuClient")
            .field("webhook_url", &self.webhook_url)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl FeishuClient {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            secret: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// 设置签名密钥，空字符串等同于不签名
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// 使用调用方配置好的 HTTP 客户端（超时、代理等）
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// 按当前时间构建请求体，配置了密钥时带上时间戳和签名
    pub fn build_envelope<'a>(&self, message: &'a Message) -> WebhookEnvelope<'a> {
        match &self.secret {
            Some(secret) => WebhookEnvelope::signed(message, secret, Utc::now().timestamp()),
            None => WebhookEnvelope::unsigned(message),
        }
    }

    /// 发送任意消息，不做重试
    pub async fn send(&self, message: &Message) -> Result<(), SendError> {
        let result = self.deliver(&self.build_envelope(message)).await;
        if let Err(e) = &result {
            warn!("Feishu {} message failed: {}", message.msg_type(), e);
        }
        result
    }

    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.send(&Message::text(text)).await
    }

    pub async fn send_rich_text(
        &self,
        title: impl Into<String>,
        lines: Vec<Vec<RichTextElement>>,
    ) -> Result<(), SendError> {
        self.send(&Message::rich_text(title, lines)).await
    }

    pub async fn send_image(&self, image_key: impl Into<String>) -> Result<(), SendError> {
        self.send(&Message::image(image_key)).await
    }

    pub async fn send_interactive(
        &self,
        config: Option<CardConfig>,
        header: Option<CardHeader>,
        elements: Vec<Value>,
    ) -> Result<(), SendError> {
        self.send(&Message::interactive(config, header, elements)).await
    }

    pub async fn send_share_chat(&self, share_chat_id: impl Into<String>) -> Result<(), SendError> {
        self.send(&Message::share_chat(share_chat_id)).await
    }

    async fn deliver(&self, envelope: &WebhookEnvelope<'_>) -> Result<(), SendError> {
        let body = serde_json::to_vec(envelope).map_err(SendError::Encode)?;
        debug!(
            "POST {} msg_type={} signed={} bytes={}",
            self.webhook_url,
            envelope.message.msg_type(),
            envelope.sign.is_some(),
            body.len()
        );

        let response = self
            .http_client
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(SendError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(SendError::transport)?;

        if status != StatusCode::OK {
            return Err(SendError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        check_response(&text)
    }
}

/// 解析飞书返回体，`code` 为非零数字时视为失败，缺省视为成功
fn check_response(body: &str) -> Result<(), SendError> {
    let object: Map<String, Value> =
        serde_json::from_str(body).map_err(SendError::ResponseParse)?;

    let Some(code) = object.get("code").and_then(Value::as_f64) else {
        return Ok(());
    };
    if code == 0.0 {
        return Ok(());
    }

    let msg = match object.get("msg") {
        Some(Value::String(msg)) => msg.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Err(SendError::Remote {
        code: object
            .get("code")
            .and_then(Value::as_i64)
            .unwrap_or(code as i64),
        msg,
    })
}
