//! 飞书机器人消息模型
//!
//! 消息类型和消息内容绑定在同一个枚举里，序列化后得到
//! `{"msg_type": "...", "content": {...}}`，内容结构必然与类型匹配。
//! 除富文本元素的 `tag`/`text` 和文本消息的 `text` 外，空字符串字段一律不输出。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const LOCALE_ZH_CN: &str = "zh_cn";
pub const LOCALE_EN_US: &str = "en_us";

pub const TAG_TEXT: &str = "text";
pub const TAG_LINK: &str = "a";
pub const TAG_AT: &str = "at";
pub const TAG_IMG: &str = "img";

const PLAIN_TEXT: &str = "plain_text";

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "post")]
    RichText,
    #[serde(rename = "interactive")]
    Interactive,
    #[serde(rename = "share_chat")]
    ShareChat,
    #[serde(rename = "image")]
    Image,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::Text,
        MessageType::RichText,
        MessageType::Interactive,
        MessageType::ShareChat,
        MessageType::Image,
    ];

    /// 线上协议中的 `msg_type` 取值
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::RichText => "post",
            MessageType::Interactive => "interactive",
            MessageType::ShareChat => "share_chat",
            MessageType::Image => "image",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条完整的消息，变体即消息类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg_type", content = "content")]
pub enum Message {
    #[serde(rename = "text")]
    Text(TextContent),
    #[serde(rename = "post")]
    RichText(RichTextContent),
    #[serde(rename = "interactive")]
    Interactive(InteractiveContent),
    #[serde(rename = "share_chat")]
    ShareChat(ShareChatContent),
    #[serde(rename = "image")]
    Image(ImageContent),
}

impl Message {
    /// 纯文本消息
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(TextContent { text: text.into() })
    }

    /// 富文本消息，内容放在 `zh_cn` 下
    ///
    /// `lines` 外层每一项是一行，内层是该行内依次拼接的元素。
    pub fn rich_text(title: impl Into<String>, lines: Vec<Vec<RichTextElement>>) -> Self {
        Message::RichText(RichTextContent::new(title, lines))
    }

    /// 图片消息，`image_key` 需事先上传获得
    pub fn image(image_key: impl Into<String>) -> Self {
        Message::Image(ImageContent {
            image_key: image_key.into(),
        })
    }

    /// 消息卡片，`elements` 原样透传
    pub fn interactive(
        config: Option<CardConfig>,
        header: Option<CardHeader>,
        elements: Vec<Value>,
    ) -> Self {
        Message::Interactive(InteractiveContent {
            config,
            header,
            elements,
        })
    }

    /// 分享群名片
    pub fn share_chat(share_chat_id: impl Into<String>) -> Self {
        Message::ShareChat(ShareChatContent {
            share_chat_id: share_chat_id.into(),
        })
    }

    pub fn msg_type(&self) -> MessageType {
        match self {
            Message::Text(_) => MessageType::Text,
            Message::RichText(_) => MessageType::RichText,
            Message::Interactive(_) => MessageType::Interactive,
            Message::ShareChat(_) => MessageType::ShareChat,
            Message::Image(_) => MessageType::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextContent {
    /// 语言标签 -> 该语言下的内容
    pub post: BTreeMap<String, PostContent>,
}

impl RichTextContent {
    pub fn new(title: impl Into<String>, lines: Vec<Vec<RichTextElement>>) -> Self {
        Self::default().with_locale(LOCALE_ZH_CN, title, lines)
    }

    /// 追加（或替换）一个语言版本
    pub fn with_locale(
        mut self,
        locale: impl Into<String>,
        title: impl Into<String>,
        lines: Vec<Vec<RichTextElement>>,
    ) -> Self {
        self.post.insert(
            locale.into(),
            PostContent {
                title: title.into(),
                content: lines,
            },
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub content: Vec<Vec<RichTextElement>>,
}

/// 富文本行内元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextElement {
    /// `text`、`a`、`at`、`img`，也允许其他取值
    pub tag: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_key: String,
}

impl RichTextElement {
    pub fn new(tag: impl Into<String>, text: impl Into<String>, options: ElementOptions) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            href: options.href.unwrap_or_default(),
            user_id: options.user_id.unwrap_or_default(),
            user_name: options.user_name.unwrap_or_default(),
            image_key: options.image_key.unwrap_or_default(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TAG_TEXT, text, ElementOptions::default())
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(TAG_LINK, text, ElementOptions::default().href(href))
    }

    pub fn at(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self::new(
            TAG_AT,
            "",
            ElementOptions::default().user_id(user_id).user_name(user_name),
        )
    }

    pub fn img(image_key: impl Into<String>) -> Self {
        Self::new(TAG_IMG, "", ElementOptions::default().image_key(image_key))
    }
}

/// 富文本元素的可选字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementOptions {
    pub href: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub image_key: Option<String>,
}

impl ElementOptions {
    /// 从键值对构建，只认 `href`、`user_id`、`user_name`、`image_key`，其余键忽略
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |options, (key, value)| match key.as_ref() {
                "href" => options.href(value),
                "user_id" => options.user_id(value),
                "user_name" => options.user_name(value),
                "image_key" => options.image_key(value),
                _ => options,
            })
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn image_key(mut self, image_key: impl Into<String>) -> Self {
        self.image_key = Some(image_key.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareChatContent {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub share_chat_id: String,
}

/// 消息卡片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<CardConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    /// 卡片元素不做建模
    #[serde(default)]
    pub elements: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    pub enable_forward: bool,
}

impl CardConfig {
    pub fn new(enable_forward: bool) -> Self {
        Self { enable_forward }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeader {
    pub title: CardHeaderTitle,
    /// 标题栏颜色，如 `blue`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template: String,
}

impl CardHeader {
    pub fn new(title: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            title: CardHeaderTitle {
                content: title.into(),
                tag: PLAIN_TEXT.to_string(),
            },
            template: template.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeaderTitle {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    pub tag: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_message_shape() {
        let msg = Message::text("hi");
        assert_eq!(msg.msg_type(), MessageType::Text);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"msg_type": "text", "content": {"text": "hi"}})
        );
    }

    #[test]
    fn test_empty_text_is_kept() {
        assert_eq!(
            serde_json::to_value(Message::text("")).unwrap(),
            json!({"msg_type": "text", "content": {"text": ""}})
        );
    }

    #[test]
    fn test_img_element_omits_empty_fields() {
        let element = RichTextElement::new(TAG_IMG, "", ElementOptions::default().image_key("k"));
        assert_eq!(
            serde_json::to_string(&element).unwrap(),
            r#"{"tag":"img","text":"","image_key":"k"}"#
        );
    }

    #[test]
    fn test_options_from_pairs_ignores_unknown_keys() {
        let options = ElementOptions::from_pairs([
            ("href", "https://www.feishu.cn"),
            ("color", "red"),
            ("user_id", "user123"),
        ]);
        assert_eq!(
            options,
            ElementOptions::default()
                .href("https://www.feishu.cn")
                .user_id("user123")
        );

        let element = RichTextElement::new(TAG_LINK, "飞书官网", options);
        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!({"tag": "a", "text": "飞书官网", "href": "https://www.feishu.cn", "user_id": "user123"})
        );
    }

    #[test]
    fn test_element_shorthands() {
        assert_eq!(
            serde_json::to_value(RichTextElement::at("ou_1", "张三")).unwrap(),
            json!({"tag": "at", "text": "", "user_id": "ou_1", "user_name": "张三"})
        );
        assert_eq!(
            serde_json::to_value(RichTextElement::link("docs", "https://example.com")).unwrap(),
            json!({"tag": "a", "text": "docs", "href": "https://example.com"})
        );
        assert_eq!(RichTextElement::img("k").tag, TAG_IMG);
    }

    #[test]
    fn test_rich_text_lines() {
        let msg = Message::rich_text(
            "标题",
            vec![
                vec![RichTextElement::text("第一行")],
                vec![
                    RichTextElement::text("包含链接: "),
                    RichTextElement::link("飞书官网", "https://www.feishu.cn"),
                ],
            ],
        );
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["msg_type"], "post");

        let zh_cn = &value["content"]["post"]["zh_cn"];
        assert_eq!(zh_cn["title"], "标题");
        let lines = zh_cn["content"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].as_array().unwrap().len(), 2);
        assert_eq!(lines[1][1]["href"], "https://www.feishu.cn");
    }

    #[test]
    fn test_rich_text_extra_locale() {
        let content = RichTextContent::new("标题", vec![vec![RichTextElement::text("你好")]])
            .with_locale(LOCALE_EN_US, "Title", vec![vec![RichTextElement::text("hello")]]);
        let value = serde_json::to_value(Message::RichText(content)).unwrap();
        let post = value["content"]["post"].as_object().unwrap();
        assert_eq!(post.len(), 2);
        assert_eq!(post["en_us"]["title"], "Title");
    }

    #[test]
    fn test_image_and_share_chat_shapes() {
        assert_eq!(
            serde_json::to_value(Message::image("img_v2_x")).unwrap(),
            json!({"msg_type": "image", "content": {"image_key": "img_v2_x"}})
        );
        assert_eq!(
            serde_json::to_value(Message::share_chat("oc_1")).unwrap(),
            json!({"msg_type": "share_chat", "content": {"share_chat_id": "oc_1"}})
        );
    }

    #[test]
    fn test_interactive_shape() {
        let elements = vec![json!({
            "tag": "div",
            "text": {"content": "这是卡片内容", "tag": "plain_text"},
        })];
        let msg = Message::interactive(
            Some(CardConfig::new(true)),
            Some(CardHeader::new("卡片标题", "blue")),
            elements.clone(),
        );
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "msg_type": "interactive",
                "content": {
                    "config": {"enable_forward": true},
                    "header": {"title": {"content": "卡片标题", "tag": "plain_text"}, "template": "blue"},
                    "elements": elements,
                }
            })
        );
    }

    #[test]
    fn test_interactive_without_config_and_header() {
        let msg = Message::interactive(None, Some(CardHeader::new("t", "")), vec![]);
        let value = serde_json::to_value(&msg).unwrap();
        let content = value["content"].as_object().unwrap();
        assert!(!content.contains_key("config"));
        assert!(!content["header"].as_object().unwrap().contains_key("template"));
        assert_eq!(content["elements"], json!([]));
    }

    #[test]
    fn test_message_deserialize() {
        let msg: Message = serde_json::from_value(json!({
            "msg_type": "post",
            "content": {"post": {"zh_cn": {"title": "t", "content": [[{"tag": "img", "image_key": "k"}]]}}}
        }))
        .unwrap();
        assert_eq!(
            msg,
            Message::rich_text("t", vec![vec![RichTextElement::img("k")]])
        );
    }

    #[test]
    fn test_message_type_names() {
        let names: Vec<&str> = MessageType::ALL.iter().map(MessageType::as_str).collect();
        assert_eq!(names, ["text", "post", "interactive", "share_chat", "image"]);
        assert_eq!(
            serde_json::to_value(MessageType::ShareChat).unwrap(),
            json!("share_chat")
        );
    }
}
