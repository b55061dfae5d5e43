//! 运行配置
//!
//! 前端没有运行时环境变量，配置在编译期通过 `option_env!` 注入，
//! 读不到时使用默认值。

use std::time::Duration;

use sprintboard_shared::TOKEN_STORAGE_KEY;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TOAST_MILLIS: u64 = 3000;

/// 应用配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端地址（不带结尾的 `/`）
    pub api_base_url: String,
    /// 保存令牌的 LocalStorage 键
    pub token_storage_key: String,
    /// 提示消息的显示时长
    pub toast_duration: Duration,
}

impl AppConfig {
    /// 从编译期环境变量读取
    ///
    /// - `SPRINTBOARD_API_URL`
    /// - `SPRINTBOARD_TOKEN_KEY`
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("SPRINTBOARD_API_URL"),
            option_env!("SPRINTBOARD_TOKEN_KEY"),
        )
    }

    fn from_vars(api_url: Option<&str>, token_key: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let token_storage_key = token_key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(TOKEN_STORAGE_KEY)
            .to_string();

        Self {
            api_base_url,
            token_storage_key,
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MILLIS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}
