//! 认证模块
//!
//! 把 [`SessionController`] 接入 Leptos：
//! 会话状态放在信号里，视图只拿到只读信号和回调方法。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use sprintboard_shared::UserProfile;

use crate::api::HttpAccountApi;
use crate::config::AppConfig;
use crate::session::{SessionController, SessionState, SessionStore, Toast};
use crate::web::BrowserPlatform;
use crate::web::route::{AppRoute, ViewSelection, dispatch_view};

/// 基于信号的会话状态存储
pub struct SignalSessionStore {
    state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
}

impl SessionStore for SignalSessionStore {
    fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.set_state.update(f);
    }
}

pub type WebSession = SessionController<HttpAccountApi, SignalSessionStore, BrowserPlatform>;

/// 会话上下文
///
/// 通过 Context 在组件间共享。所有字段都是 `Copy` 的句柄。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 当前提示消息（只读）
    pub toast: ReadSignal<Option<Toast>>,
    set_toast: WriteSignal<Option<Toast>>,
    controller: StoredValue<Rc<WebSession>, LocalStorage>,
}

impl SessionContext {
    fn controller(&self) -> Rc<WebSession> {
        self.controller.get_value()
    }

    /// 当前路径下应显示的视图（响应式）
    pub fn selection(&self) -> ViewSelection {
        self.state.with(|s| dispatch_view(&s.path, s))
    }

    /// 页面调用业务接口时使用的令牌
    pub fn auth_token(&self) -> Option<String> {
        self.state.with(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.with(|s| s.user.clone())
    }

    pub fn api(&self) -> HttpAccountApi {
        self.controller.with_value(|c| c.api().clone())
    }

    pub fn navigate(&self, path: &str) {
        self.controller.with_value(|c| c.navigate(path));
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate(route.to_path());
    }

    pub(crate) fn redirect(&self, route: AppRoute) {
        self.controller.with_value(|c| c.redirect(route));
    }

    pub(crate) fn sync_location(&self) {
        self.controller.with_value(|c| c.sync_location());
    }

    /// 用户主动登出
    pub fn logout(&self) {
        self.controller.with_value(|c| c.logout());
        self.set_toast.set(Some(Toast::info("Signed out")));
    }

    pub fn dismiss_toast(&self) {
        self.set_toast.set(None);
    }

    pub async fn login_succeeded(self, token: String) {
        self.controller().on_login_success(token).await;
    }

    /// 邮箱验证页在后端签发令牌后调用
    pub async fn verification_succeeded(self, token: String) {
        self.controller().on_verification_success(token).await;
    }

    /// 创建/编辑资料页保存成功后调用
    pub async fn profile_saved(self) {
        self.controller().on_profile_saved().await;
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 创建会话上下文并提供到 Context
///
/// 令牌每次变化（包括启动时）都会重新执行初始化。
pub fn init_session(config: &AppConfig) -> SessionContext {
    let (state, set_state) = signal(SessionState::default());
    let (toast, set_toast) = signal(Option::<Toast>::None);

    let controller = SessionController::new(
        HttpAccountApi::new(config.api_base_url.clone()),
        SignalSessionStore { state, set_state },
        BrowserPlatform::new(config.token_storage_key.clone(), set_toast),
    );

    let ctx = SessionContext {
        state,
        toast,
        set_toast,
        controller: StoredValue::new_local(Rc::new(controller)),
    };
    provide_context(ctx);

    let token = Memo::new(move |_| state.with(|s| s.token.clone()));
    Effect::new(move |_| {
        token.track();
        let controller = ctx.controller();
        spawn_local(async move {
            controller.initialize().await;
        });
    });

    ctx
}
