//! 飞书自定义机器人签名
//!
//! 将 `"{timestamp}\n{secret}"` 作为 HMAC-SHA256 的密钥，对空消息求摘要，
//! 再做标准 base64 编码。服务端按同样的方式校验，改动任何一步都会导致签名失败。

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 根据密钥和秒级时间戳生成签名
pub fn gen_sign(secret: &str, timestamp: i64) -> String {
    let string_to_sign = format!("{timestamp}\n{secret}");
    let mac = HmacSha256::new_from_slice(string_to_sign.as_bytes())
        .expect("HMAC can take key of any size");
    STANDARD.encode(mac.finalize().into_bytes())
}
