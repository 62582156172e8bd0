use crate::client::FeishuClient;
use crate::message::{Message, MessageType};
use async_trait::async_trait;
use common::{
    PlatformFactory, PlatformInfo, PushInitConfig, PushPlatform, PushPlatformCapabilities,
    SendError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const PLATFORM_NAME: &str = "feishu";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 飞书机器人配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeishuConfig {
    pub webhook_url: String,
    #[serde(default)]
    pub secret: Option<String>,
    /// 请求超时（秒）
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl FeishuConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            secret: None,
            timeout: None,
        }
    }
}

impl PushInitConfig for FeishuConfig {
    fn platform_name(&self) -> &str {
        PLATFORM_NAME
    }

    fn webhook_url(&self) -> String {
        self.webhook_url.clone()
    }

    fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }

    fn timeout(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

/// 飞书群机器人推送平台
pub struct FeishuGroupBotPlatform {
    client: FeishuClient,
}

impl FeishuGroupBotPlatform {
    pub fn client(&self) -> &FeishuClient {
        &self.client
    }
}

#[async_trait]
impl PushPlatformCapabilities for FeishuGroupBotPlatform {
    async fn send_text(&self, content: &str) -> Result<(), SendError> {
        self.client.send_text(content).await
    }

    async fn send_raw(&self, message: Value) -> Result<(), SendError> {
        let message: Message =
            serde_json::from_value(message).map_err(|e| SendError::Message(e.to_string()))?;
        self.client.send(&message).await
    }

    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            name: PLATFORM_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            message_types: MessageType::ALL
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            supports_signing: true,
        }
    }
}

impl PushPlatform<FeishuConfig> for FeishuGroupBotPlatform {
    fn new(config: FeishuConfig) -> Result<Self, SendError>
    where
        Self: Sized,
    {
        if config.webhook_url.trim().is_empty() {
            return Err(SendError::Config("webhook_url must not be empty".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout()))
            .build()
            .map_err(|e| SendError::Config(e.to_string()))?;

        let mut client = FeishuClient::new(config.webhook_url()).with_http_client(http_client);
        if let Some(secret) = config.secret() {
            client = client.with_secret(secret);
        }
        Ok(Self { client })
    }
}

// --- Platform Factory ---

pub struct FeishuPlatformFactory;

impl PlatformFactory for FeishuPlatformFactory {
    fn create(&self, config: Value) -> Result<Box<dyn PushPlatformCapabilities>, SendError> {
        let config: FeishuConfig =
            serde_json::from_value(config).map_err(|e| SendError::Config(e.to_string()))?;
        let platform = FeishuGroupBotPlatform::new(config)?;
        Ok(Box::new(platform))
    }

    fn name(&self) -> &'static str {
        PLATFORM_NAME
    }
}
