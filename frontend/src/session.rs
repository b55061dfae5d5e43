//! 会话模块
//!
//! 会话状态、状态机阶段，以及控制器依赖的适配器接口。
//! 控制器本身只通过这些接口接触浏览器，因此可以在宿主机上测试。

mod controller;
mod profile;

pub use controller::SessionController;
pub use profile::{ProfileOutcome, classify_profile_response};

use std::cell::RefCell;

use sprintboard_shared::UserProfile;

/// 会话状态
///
/// 唯一的写入者是 [`SessionController`]，视图只拿到只读副本。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// 当前路径，与浏览器地址栏同步
    pub path: String,
    /// 会话令牌
    pub token: Option<String>,
    /// 当前用户资料
    pub user: Option<UserProfile>,
    /// 为真时视图显示加载状态
    pub initializing: bool,
    /// 后端明确报告该身份还没有资料
    pub profile_missing: bool,
}

impl SessionState {
    pub fn new(path: impl Into<String>, token: Option<String>) -> Self {
        Self {
            path: path.into(),
            token,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.token, &self.user) {
            (None, _) => SessionPhase::Guest,
            (Some(_), Some(_)) => SessionPhase::Authenticated,
            (Some(_), None) if self.profile_missing => SessionPhase::NeedsProfile,
            (Some(_), None) => SessionPhase::TokenPending,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            token: None,
            user: None,
            initializing: true,
            profile_missing: false,
        }
    }
}

/// 会话状态机的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// 没有令牌
    Guest,
    /// 有令牌，资料尚未解析
    TokenPending,
    /// 有令牌，但后端报告资料不存在
    NeedsProfile,
    /// 令牌和资料都已就绪
    Authenticated,
}

/// 提示消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// 提示消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

// =========================================================
// 适配器接口
// =========================================================

/// 会话状态的持有者
pub trait SessionStore {
    fn snapshot(&self) -> SessionState;
    fn update(&self, f: impl FnOnce(&mut SessionState));
}

impl SessionStore for RefCell<SessionState> {
    fn snapshot(&self) -> SessionState {
        self.borrow().clone()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.borrow_mut());
    }
}

/// 运行平台：令牌持久化、浏览历史和提示消息
pub trait Platform {
    fn load_token(&self) -> Option<String>;
    fn save_token(&self, token: &str);
    fn clear_token(&self);

    fn current_path(&self) -> String;
    fn push_path(&self, path: &str);
    fn replace_path(&self, path: &str);

    fn notify(&self, toast: Toast);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "A".into(),
            email: "a@example.com".into(),
            role: Default::default(),
            department: None,
            phone: None,
            created_at: None,
        }
    }

    #[test]
    fn default_state_is_initializing_guest() {
        let state = SessionState::default();
        assert!(state.initializing);
        assert_eq!(state.phase(), SessionPhase::Guest);
    }

    #[test]
    fn phases() {
        let mut state = SessionState::new("/homepage", Some("abc".into()));
        assert_eq!(state.phase(), SessionPhase::TokenPending);

        state.profile_missing = true;
        assert_eq!(state.phase(), SessionPhase::NeedsProfile);

        state.profile_missing = false;
        state.user = Some(user());
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert!(state.is_authenticated());

        state.token = None;
        assert_eq!(state.phase(), SessionPhase::Guest);
    }

    #[test]
    fn refcell_store_updates_in_place() {
        let store = RefCell::new(SessionState::default());
        store.update(|s| s.path = "/about".into());
        assert_eq!(store.snapshot().path, "/about");
    }
}
