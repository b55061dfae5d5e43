//! 浏览器平台适配
//!
//! 所有对 window.history 与令牌存储的操作都集中在此模块。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::storage::WebStorage;
use crate::session::{Platform, Toast};

/// 获取当前浏览器路径（含查询串）
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| {
            let location = w.location();
            let path = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(format!("{}{}", path, search))
        })
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 浏览器平台
///
/// 提示消息写入信号，由 `ToastHost` 渲染。
#[derive(Clone)]
pub struct BrowserPlatform {
    token_key: String,
    toast: WriteSignal<Option<Toast>>,
}

impl BrowserPlatform {
    pub fn new(token_key: impl Into<String>, toast: WriteSignal<Option<Toast>>) -> Self {
        Self {
            token_key: token_key.into(),
            toast,
        }
    }
}

impl Platform for BrowserPlatform {
    fn load_token(&self) -> Option<String> {
        WebStorage::get(&self.token_key)
    }

    fn save_token(&self, token: &str) {
        if !WebStorage::set(&self.token_key, token) {
            log::warn!("[Session] Failed to persist token to LocalStorage.");
        }
    }

    fn clear_token(&self) {
        WebStorage::delete(&self.token_key);
    }

    fn current_path(&self) -> String {
        current_path()
    }

    fn push_path(&self, path: &str) {
        push_history_state(path);
    }

    fn replace_path(&self, path: &str) {
        replace_history_state(path);
    }

    fn notify(&self, toast: Toast) {
        self.toast.set(Some(toast));
    }
}
