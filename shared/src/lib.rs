use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中保存会话令牌的默认键
pub const TOKEN_STORAGE_KEY: &str = "authToken";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 后端在用户尚未创建资料时返回的提示文本。
/// 旧版后端只返回这段文本，没有结构化的错误码。
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Không tìm thấy thông tin người dùng";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Employee,
    /// 后端新增的角色，客户端不认识时按普通成员处理
    #[serde(other)]
    Unknown,
}

/// 当前登录用户的资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 界面上展示的名字，资料未填写姓名时退回邮箱
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
