//! SprintBoard 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与视图分发（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话/导航控制器，与浏览器解耦
//! - `auth`: 把会话控制器接入 Leptos 上下文
//! - `components`: UI 组件层

pub mod api;
pub mod auth;
mod components {
    pub mod login;
    pub mod shell;
    pub mod status;
    pub mod toast;
}
pub mod config;
pub mod error;
pub mod session;

use crate::auth::init_session;
use crate::components::login::LoginPage;
use crate::components::shell::PageShell;
use crate::components::toast::ToastHost;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，以减小 WASM 二进制体积。
pub mod web {
    mod http;
    mod platform;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::HttpClient;
    pub use platform::BrowserPlatform;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        other => view! { <PageShell route=other /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取配置
    let config = AppConfig::from_build_env();

    // 2. 创建会话上下文（从 LocalStorage 读取令牌，启动初始化）
    init_session(&config);

    view! {
        <ToastHost duration=config.toast_duration />
        // 3. 路由器组件：监听地址变化并执行守卫重定向
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
