//! 飞书（Lark）自定义机器人 webhook 推送

pub mod client;
pub mod message;
pub mod platform;
pub mod sdk;
pub mod sign;

pub use client::{FeishuClient, WebhookEnvelope};
pub use common::SendError;
pub use message::{
    CardConfig, CardHeader, CardHeaderTitle, ElementOptions, ImageContent, InteractiveContent,
    Message, MessageType, PostContent, RichTextContent, RichTextElement, ShareChatContent,
    TextContent,
};
pub use platform::{FeishuConfig, FeishuGroupBotPlatform, FeishuPlatformFactory, PLATFORM_NAME};
pub use sdk::{
    FeishuBot, send_image_message, send_interactive_message, send_rich_text_message,
    send_share_chat_message, send_text_message,
};
pub use sign::gen_sign;
