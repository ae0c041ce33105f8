//! Google Cloud Translation v2 REST 客户端

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TranslationError, Translator};
use crate::config::{Credentials, Settings, ENV_ACCESS_TOKEN, ENV_API_KEY};

pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize, Debug)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Deserialize, Debug)]
struct TranslationList {
    translations: Vec<Translation>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// 按配置构建；未设置任何凭据时立即报错，不等到第一次请求
    pub fn from_settings(settings: &Settings) -> Result<Self, TranslationError> {
        let credentials = settings.credentials.clone().ok_or_else(|| {
            TranslationError::MissingCredentials(format!("{ENV_API_KEY} 或 {ENV_ACCESS_TOKEN}"))
        })?;
        Ok(Self::new(Client::new(), settings.endpoint.clone(), credentials))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let body = TranslateRequest {
            q: text,
            target: target_language,
            format: "text",
        };

        let request = self.client.post(&self.endpoint).json(&body);
        let request = match &self.credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key.as_str())]),
            Credentials::AccessToken(token) => request.bearer_auth(token),
        };

        let response = request.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::Service {
                status: status.as_u16(),
                message: service_error_message(&raw),
            });
        }
        parse_translation(&raw)
    }
}

/// 从 `{"data": {"translations": [{"translatedText": ..}]}}` 中取第一条译文
fn parse_translation(raw: &str) -> Result<String, TranslationError> {
    let parsed: TranslateResponse = serde_json::from_str(raw)
        .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
    parsed
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| TranslationError::InvalidResponse("响应中没有译文".into()))
}

/// 错误响应优先取 `error.message`，否则原样返回响应体
fn service_error_message(raw: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(raw) {
        Ok(envelope) => envelope.error.message,
        Err(_) => raw.trim().to_string(),
    }
}
