use thiserror::Error;

/// 调用后端 API 时的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求构建失败（序列化、Header 设置等）
    #[error("请求构建失败: {0}")]
    RequestBuild(String),
    /// 网络请求失败（fetch 抛出异常）
    #[error("网络错误: {0}")]
    Network(String),
    /// 后端返回非 2xx 状态
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// 响应体无法解析
    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl ApiError {
    /// 适合直接展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
