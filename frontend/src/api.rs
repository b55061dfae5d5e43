use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sprintboard_shared::protocol::{ApiErrorBody, ApiRequest, CurrentProfileRequest, LoginRequest};

use crate::error::{ApiError, ApiResult};
use crate::web::HttpClient;

/// 未经解释的后端响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 从错误响应体中取出 `message`，取不到时用状态码描述
    pub fn error_message(&self) -> String {
        self.json::<ApiErrorBody>()
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("请求失败 (HTTP {})", self.status))
    }

    /// 成功时解析响应体，失败时转为 [`ApiError::Status`]
    pub fn into_result<T: DeserializeOwned>(self) -> ApiResult<T> {
        if !self.is_success() {
            return Err(ApiError::Status {
                status: self.status,
                message: self.error_message(),
            });
        }
        self.json()
    }
}

/// 会话控制器依赖的账户接口
#[async_trait(?Send)]
pub trait AccountApi {
    /// 获取令牌持有者的资料
    ///
    /// 只有传输层失败返回 `Err`，HTTP 状态和响应体原样交给调用方解释。
    async fn fetch_current_profile(&self, token: &str) -> ApiResult<RawResponse>;
}

/// 基于 fetch 的后端客户端
#[derive(Clone, Debug, PartialEq)]
pub struct HttpAccountApi {
    base_url: String,
}

impl HttpAccountApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn send<R: ApiRequest>(&self, request: &R, token: Option<&str>) -> ApiResult<RawResponse> {
        let mut builder = HttpClient::request(R::METHOD, &self.url(R::PATH));

        if let Some(token) = token {
            builder = builder.bearer(token);
        }

        if R::METHOD.has_body() {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::RequestBuild(e.to_string()))?;
            builder = builder.json_body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }

    /// 登录，成功时返回会话令牌
    pub async fn login(&self, email: String, password: String) -> ApiResult<String> {
        let response = self.send(&LoginRequest { email, password }, None).await?;
        let parsed: <LoginRequest as ApiRequest>::Response = response.into_result()?;
        Ok(parsed.token)
    }
}

#[async_trait(?Send)]
impl AccountApi for HttpAccountApi {
    async fn fetch_current_profile(&self, token: &str) -> ApiResult<RawResponse> {
        self.send(&CurrentProfileRequest, Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_shared::protocol::AuthTokenResponse;

    #[test]
    fn url_joins_paths() {
        let api = HttpAccountApi::new("https://api.example.com/");
        assert_eq!(
            api.url("/api/users/profile"),
            "https://api.example.com/api/users/profile"
        );
        assert_eq!(api.url("api/auth/login"), "https://api.example.com/api/auth/login");
    }

    #[test]
    fn error_message_from_body() {
        let resp = RawResponse::new(401, r#"{"message":"Phiên đăng nhập hết hạn"}"#);
        assert!(!resp.is_success());
        assert_eq!(resp.error_message(), "Phiên đăng nhập hết hạn");
    }

    #[test]
    fn error_message_without_body() {
        let resp = RawResponse::new(502, "<html>Bad gateway</html>");
        assert_eq!(resp.error_message(), "请求失败 (HTTP 502)");
    }

    #[test]
    fn into_result_maps_status_errors() {
        let resp = RawResponse::new(400, r#"{"message":"Sai mật khẩu"}"#);
        let err = resp.into_result::<AuthTokenResponse>().unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Sai mật khẩu".to_string()
            }
        );
    }

    #[test]
    fn into_result_parses_success() {
        let resp = RawResponse::new(200, r#"{"token":"abc"}"#);
        let parsed: AuthTokenResponse = resp.into_result().unwrap();
        assert_eq!(parsed.token, "abc");
    }

    #[test]
    fn into_result_reports_decode_errors() {
        let resp = RawResponse::new(200, "not json");
        let err = resp.into_result::<AuthTokenResponse>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
