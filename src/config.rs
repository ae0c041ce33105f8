//! 运行配置：从环境变量读取，测试中可注入查找函数

// === 常量定义（消除魔法值） ===
pub const ENV_MODE: &str = "JSON_FANYI_ENV";
pub const ENV_API_KEY: &str = "GOOGLE_TRANSLATE_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "GOOGLE_TRANSLATE_ACCESS_TOKEN";
pub const ENV_ENDPOINT: &str = "GOOGLE_TRANSLATE_ENDPOINT";

pub const MODE_DEVELOPMENT: &str = "development";
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// 翻译服务凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    AccessToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// 开发模式下不逐条打印待翻译文本
    pub development: bool,
    pub credentials: Option<Credentials>,
    pub endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            development: false,
            credentials: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// API key 优先于 access token；空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let development = non_empty(ENV_MODE)
            .map(|mode| mode.trim().eq_ignore_ascii_case(MODE_DEVELOPMENT))
            .unwrap_or(false);

        let credentials = non_empty(ENV_API_KEY)
            .map(Credentials::ApiKey)
            .or_else(|| non_empty(ENV_ACCESS_TOKEN).map(Credentials::AccessToken));

        let endpoint = non_empty(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self {
            development,
            credentials,
            endpoint,
        }
    }
}
