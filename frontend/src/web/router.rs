//! 路由服务模块 - 核心引擎
//!
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程：
//! 浏览器前进/后退时同步路径，视图分发给出重定向时替换历史记录，
//! 出口组件按分发结果渲染。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, ViewSelection};
use crate::auth::{SessionContext, use_session};
use crate::components::status::{InlineLoading, LoadingView, NotFoundPage};

/// 初始化浏览器后退/前进按钮监听
fn init_popstate_listener(session: SessionContext) {
    let closure = Closure::<dyn Fn()>::new(move || {
        session.sync_location();
    });

    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
    }

    // 泄漏闭包以保持监听器存活
    closure.forget();
}

/// 分发结果为重定向时执行跳转
///
/// 每次会话状态或路径变化都会重新分发，直到落在可渲染的视图上。
fn setup_redirects(session: SessionContext) {
    Effect::new(move |_| {
        if let ViewSelection::Redirect(target) = session.selection() {
            session.redirect(target);
        }
    });
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 应放在会话上下文提供之后使用。
#[component]
pub fn Router(
    /// 子组件
    children: Children,
) -> impl IntoView {
    let session = use_session();

    init_popstate_listener(session);
    setup_redirects(session);

    children()
}

/// 路由出口组件
///
/// 根据当前分发结果渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let session = use_session();
    // 只在分发结果变化时重新渲染，用户资料刷新不会重建页面
    let selection = Memo::new(move |_| session.selection());

    move || match selection.get() {
        ViewSelection::Render(route) => matcher(route),
        ViewSelection::InlineLoading => view! { <InlineLoading /> }.into_any(),
        ViewSelection::NotFound => view! { <NotFoundPage /> }.into_any(),
        // 重定向由 Effect 处理，过渡期间显示加载
        ViewSelection::Loading | ViewSelection::Redirect(_) => view! { <LoadingView /> }.into_any(),
    }
}
