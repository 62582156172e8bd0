//! 依次演示各类消息的发送方式。
//!
//! ```sh
//! FEISHU_WEBHOOK_URL=https://open.feishu.cn/open-apis/bot/v2/hook/xxx \
//! FEISHU_SECRET=xxx \
//! cargo run -p feishu_group_bot --example showcase
//! ```

use anyhow::Context;
use feishu_group_bot::{
    CardConfig, CardHeader, ElementOptions, FeishuBot, RichTextElement, send_text_message,
};
use log::*;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));

    let webhook_url = env::var("FEISHU_WEBHOOK_URL").context("FEISHU_WEBHOOK_URL is not set")?;
    let secret = env::var("FEISHU_SECRET").ok();

    let bot = FeishuBot::new(&webhook_url, secret.as_deref());
    if let Err(e) = bot.send_text("Hello, 这是一条测试消息!").await {
        error!("发送文本消息失败: {e}");
    }

    let unsigned = FeishuBot::new(&webhook_url, None);
    if let Err(e) = unsigned.send_text("Hello, 这是一条不带签名的测试消息!").await {
        error!("发送不带签名的文本消息失败: {e}");
    }

    let lines = vec![
        vec![RichTextElement::text("这是一条富文本消息\n")],
        vec![
            RichTextElement::text("包含链接: "),
            RichTextElement::link("飞书官网", "https://www.feishu.cn"),
        ],
        vec![RichTextElement::new(
            "text",
            "以及 @用户",
            ElementOptions::from_pairs([("user_id", "user123"), ("user_name", "张三")]),
        )],
    ];
    if let Err(e) = bot.send_rich_text("富文本标题", lines).await {
        error!("发送富文本消息失败: {e}");
    }

    if let Err(e) = bot
        .send_image("img_v2_041b28e3-5680-48c2-9af2-497ace79333g")
        .await
    {
        error!("发送图片消息失败: {e}");
    }

    if let Err(e) =
        send_text_message(&webhook_url, "使用便捷函数发送的消息", secret.as_deref()).await
    {
        error!("便捷函数发送消息失败: {e}");
    }

    let elements = vec![json!({
        "tag": "div",
        "text": {"content": "这是卡片内容", "tag": "plain_text"},
    })];
    if let Err(e) = bot
        .send_interactive(
            Some(CardConfig::new(true)),
            Some(CardHeader::new("卡片标题", "blue")),
            elements,
        )
        .await
    {
        error!("发送交互式卡片失败: {e}");
    }

    info!("所有示例执行完成!");
    Ok(())
}
