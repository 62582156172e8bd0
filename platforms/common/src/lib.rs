use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 推送失败类型
///
/// 每一种失败都原样返回给调用方，这一层不做重试。
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// 连接失败、DNS 解析失败、超时等
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Request failed with status: {status}, body: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Parse response failed: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// 平台返回了非零的 code
    #[error("Remote error: code={code}, msg={msg}")]
    Remote { code: i64, msg: String },

    #[error("Encode request failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Message error: {0}")]
    Message(String),
}

impl SendError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        SendError::Transport(err.into())
    }
}

/// 推送结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResult {
    /// 是否成功
    pub success: bool,
    /// 响应信息
    pub response: Option<String>,
    /// 时间戳
    pub timestamp: DateTime<Utc>,
}

impl Default for PushResult {
    fn default() -> Self {
        Self {
            success: false,
            response: None,
            timestamp: Utc::now(),
        }
    }
}

impl PushResult {
    pub fn from_outcome(outcome: &Result<(), SendError>) -> Self {
        match outcome {
            Ok(()) => Self {
                success: true,
                ..Default::default()
            },
            Err(e) => Self {
                success: false,
                response: Some(e.to_string()),
                ..Default::default()
            },
        }
    }
}

/// 初始化配置trait
pub trait PushInitConfig: Send + Sync {
    /// 获取平台名称
    fn platform_name(&self) -> &str;

    /// 获取webhook URL
    fn webhook_url(&self) -> String;

    /// 获取密钥，空字符串视为未配置
    fn secret(&self) -> Option<&str>;

    /// 获取超时时间（秒）
    fn timeout(&self) -> u64;
}

/// 推送平台能力trait（用于dyn兼容）
#[async_trait]
pub trait PushPlatformCapabilities: Send + Sync {
    /// 发送纯文本消息
    async fn send_text(&self, content: &str) -> Result<(), SendError>;

    /// 发送平台自定义格式的消息，由平台自行解析
    async fn send_raw(&self, message: Value) -> Result<(), SendError>;

    /// 获取平台信息
    fn platform_info(&self) -> PlatformInfo;
}

/// 推送平台trait（用于具体实现）
pub trait PushPlatform<C: PushInitConfig>: PushPlatformCapabilities {
    /// 创建一个新的推送平台实例
    fn new(config: C) -> Result<Self, SendError>
    where
        Self: Sized;
}

/// 平台信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// 平台名称
    pub name: String,
    /// 版本
    pub version: String,
    /// 支持的消息类型
    pub message_types: Vec<String>,
    /// 是否支持签名校验
    pub supports_signing: bool,
}

/// 平台工厂trait
pub trait PlatformFactory: Send + Sync {
    /// 根据JSON Value创建平台实例
    fn create(&self, config: Value) -> Result<Box<dyn PushPlatformCapabilities>, SendError>;

    /// 获取平台名称
    fn name(&self) -> &'static str;
}

/// 平台注册表
#[derive(Default)]
pub struct PlatformRegistry {
    factories: HashMap<String, Box<dyn PlatformFactory>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册平台工厂，同名工厂会被替换
    pub fn register(&mut self, factory: Box<dyn PlatformFactory>) {
        self.factories.insert(factory.name().to_string(), factory);
    }

    pub fn get_factory(&self, name: &str) -> Option<&dyn PlatformFactory> {
        self.factories.get(name).map(|f| f.as_ref())
    }

    /// 获取所有支持的平台名称
    pub fn list_platforms(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullPlatform;

    #[async_trait]
    impl PushPlatformCapabilities for NullPlatform {
        async fn send_text(&self, _content: &str) -> Result<(), SendError> {
            Ok(())
        }

        async fn send_raw(&self, _message: Value) -> Result<(), SendError> {
            Err(SendError::Message("unsupported".to_string()))
        }

        fn platform_info(&self) -> PlatformInfo {
            PlatformInfo {
                name: "null".to_string(),
                version: "0.0.0".to_string(),
                message_types: vec!["text".to_string()],
                supports_signing: false,
            }
        }
    }

    struct NullFactory(&'static str);

    impl PlatformFactory for NullFactory {
        fn create(&self, _config: Value) -> Result<Box<dyn PushPlatformCapabilities>, SendError> {
            Ok(Box::new(NullPlatform))
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn test_push_result_default() {
        let result = PushResult::default();
        assert!(!result.success);
        assert!(result.response.is_none());
    }

    #[test]
    fn test_push_result_from_outcome() {
        let ok = PushResult::from_outcome(&Ok(()));
        assert!(ok.success);

        let failed = PushResult::from_outcome(&Err(SendError::Remote {
            code: 19001,
            msg: "param invalid".to_string(),
        }));
        assert!(!failed.success);
        assert_eq!(
            failed.response.as_deref(),
            Some("Remote error: code=19001, msg=param invalid")
        );
    }

    #[test]
    fn test_platform_registry() {
        let mut registry = PlatformRegistry::new();
        assert!(registry.list_platforms().is_empty());

        registry.register(Box::new(NullFactory("zeta")));
        registry.register(Box::new(NullFactory("alpha")));
        assert_eq!(registry.list_platforms(), vec!["alpha", "zeta"]);
        assert!(registry.get_factory("alpha").is_some());
        assert!(registry.get_factory("missing").is_none());
    }

    #[test]
    fn test_http_status_error_display() {
        let err = SendError::HttpStatus {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status: 500, body: boom");
    }
}
