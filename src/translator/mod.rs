//! 翻译适配层：`translate(文本, 目标语言) -> 译文` 能力的抽象

use async_trait::async_trait;
use thiserror::Error;

pub mod google;

pub use google::GoogleTranslator;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("翻译请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("翻译服务返回错误 (HTTP {status}): {message}")]
    Service { status: u16, message: String },
    #[error("翻译服务响应无效: {0}")]
    InvalidResponse(String),
    #[error("缺少翻译服务凭据：请设置 {0}")]
    MissingCredentials(String),
}

/// 外部翻译能力
///
/// 同样参数的多次调用结果可互换，调用之间没有顺序依赖。
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError>;
}
