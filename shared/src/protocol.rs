use crate::{PROFILE_NOT_FOUND_MESSAGE, UserProfile};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a JSON body is sent with this method.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Error bodies
// =========================================================

/// Machine-readable error codes. Older backends omit the field entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ProfileNotFound,
    Unauthorized,
    TokenExpired,
    #[serde(other)]
    Other,
}

/// Body returned by the backend alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<ErrorCode>,
}

// =========================================================
// Request Definitions
// =========================================================

/// Fetch the profile of the bearer of the current token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CurrentProfileRequest;

/// Response of [`CurrentProfileRequest`].
///
/// The same shape carries success (`user`) and failure (`message`, `code`),
/// and a missing profile may arrive with a 2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<ErrorCode>,
}

impl ProfileEnvelope {
    /// True when the server reports that no profile exists for this identity.
    ///
    /// The structured code wins; the message match is kept for backends that
    /// only send the human-readable text.
    pub fn reports_missing_profile(&self) -> bool {
        if self.code == Some(ErrorCode::ProfileNotFound) {
            return true;
        }
        self.message
            .as_deref()
            .is_some_and(|m| m.contains(PROFILE_NOT_FOUND_MESSAGE))
    }
}

impl ApiRequest for CurrentProfileRequest {
    type Response = ProfileEnvelope;
    const PATH: &'static str = "/api/users/profile";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Exchange credentials for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokenResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = AuthTokenResponse;
    const PATH: &'static str = "/api/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}
