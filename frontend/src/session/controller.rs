//! 会话/导航控制器
//!
//! 负责令牌生命周期、当前用户资料的解析，以及与之相关的导航。
//! 视图通过回调请求状态变更，从不直接写入会话状态。

use std::cell::Cell;

use log::{debug, info, warn};

use super::profile::{ProfileOutcome, classify_profile_response};
use super::{Platform, SessionState, SessionStore, Toast};
use crate::api::AccountApi;
use crate::web::route::{AppRoute, is_public_path};

/// 进行中的资料请求标记
///
/// 标记带有会话代数：旧会话遗留的请求不会挡住新会话的请求。
/// drop 时释放，无论请求成功与否。
struct InFlightGuard<'a> {
    slot: &'a Cell<Option<u64>>,
    generation: u64,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(slot: &'a Cell<Option<u64>>, generation: u64) -> Option<Self> {
        if slot.get() == Some(generation) {
            return None;
        }
        slot.set(Some(generation));
        Some(Self { slot, generation })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.slot.get() == Some(self.generation) {
            self.slot.set(None);
        }
    }
}

pub struct SessionController<A, S, P> {
    api: A,
    store: S,
    platform: P,
    /// 会话代数，每次签发新令牌或登出时递增
    generation: Cell<u64>,
    in_flight: Cell<Option<u64>>,
}

impl<A, S, P> SessionController<A, S, P>
where
    A: AccountApi,
    S: SessionStore,
    P: Platform,
{
    /// 创建控制器，并从平台读取一次持久化的令牌和当前路径
    pub fn new(api: A, store: S, platform: P) -> Self {
        let token = platform.load_token().filter(|t| !t.is_empty());
        let path = platform.current_path();
        info!(
            "[Session] Starting at {} ({})",
            path,
            if token.is_some() { "token found" } else { "no token" }
        );
        store.update(|state| *state = SessionState::new(path, token));

        Self {
            api,
            store,
            platform,
            generation: Cell::new(0),
            in_flight: Cell::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    fn next_generation(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    // =========================================================
    // 资料解析
    // =========================================================

    /// 解析令牌对应的用户资料
    ///
    /// 同一会话内同时只会发出一个请求，后来的调用直接返回
    /// [`ProfileOutcome::InProgress`]。请求完成时如果会话已更替，
    /// 返回 [`ProfileOutcome::Superseded`] 且不修改状态。
    pub async fn resolve_profile(&self, token: &str) -> ProfileOutcome {
        if token.is_empty() {
            return ProfileOutcome::Failed("会话令牌为空".to_string());
        }

        let generation = self.generation.get();
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight, generation) else {
            debug!("[Session] Profile request already in flight, skipping.");
            return ProfileOutcome::InProgress;
        };

        let outcome = match self.api.fetch_current_profile(token).await {
            Ok(response) => classify_profile_response(&response),
            Err(e) => ProfileOutcome::Failed(e.to_string()),
        };

        if self.generation.get() != generation {
            info!("[Session] Discarding profile result from a previous session.");
            return ProfileOutcome::Superseded;
        }

        match &outcome {
            ProfileOutcome::Resolved(user) => {
                let user = user.clone();
                self.store.update(|state| {
                    state.user = Some(user);
                    state.profile_missing = false;
                });
            }
            ProfileOutcome::Missing => self.store.update(|state| {
                state.user = None;
                state.profile_missing = true;
            }),
            ProfileOutcome::Failed(msg) => {
                warn!("[Session] Profile request failed: {}", msg);
                self.store.update(|state| {
                    state.user = None;
                    state.profile_missing = false;
                });
            }
            ProfileOutcome::InProgress | ProfileOutcome::Superseded => {}
        }

        outcome
    }

    // =========================================================
    // 导航
    // =========================================================

    /// 推入新的历史记录并同步更新当前路径
    pub fn navigate(&self, path: &str) {
        if self.store.snapshot().path == path {
            return;
        }
        debug!("[Router] Navigate to {}", path);
        self.platform.push_path(path);
        self.store.update(|state| state.path = path.to_string());
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate(route.to_path());
    }

    /// 替换当前历史记录，用于守卫产生的重定向
    pub fn redirect(&self, route: AppRoute) {
        let path = route.to_path();
        info!("[Router] Redirecting to {}", path);
        self.platform.replace_path(path);
        self.store.update(|state| state.path = path.to_string());
    }

    /// 浏览器前进/后退后从地址栏同步路径
    pub fn sync_location(&self) {
        let path = self.platform.current_path();
        self.store.update(|state| state.path = path);
    }

    // =========================================================
    // 会话流程
    // =========================================================

    /// 启动时以及令牌变化后执行
    pub async fn initialize(&self) {
        let state = self.store.snapshot();

        match state.token {
            Some(token) => match self.resolve_profile(&token).await {
                ProfileOutcome::Missing => self.navigate_to(AppRoute::profile_setup_redirect()),
                ProfileOutcome::Failed(msg) => {
                    self.platform.notify(Toast::error(msg));
                    self.force_logout();
                }
                ProfileOutcome::Resolved(_)
                | ProfileOutcome::InProgress
                | ProfileOutcome::Superseded => {}
            },
            None => {
                if !is_public_path(&state.path) {
                    self.navigate_to(AppRoute::auth_failure_redirect());
                }
            }
        }

        self.store.update(|state| state.initializing = false);
    }

    /// 登录成功
    pub async fn on_login_success(&self, token: String) {
        self.establish_session(token).await;
    }

    /// 邮箱验证成功，后端同时签发了令牌
    pub async fn on_verification_success(&self, token: String) {
        self.establish_session(token).await;
    }

    /// 保存新令牌并解析资料
    ///
    /// 解析失败只提示错误，保留新令牌以便用户重试。
    async fn establish_session(&self, token: String) {
        self.platform.save_token(&token);
        self.next_generation();
        self.store.update(|state| {
            state.token = Some(token.clone());
            state.user = None;
            state.profile_missing = false;
        });

        match self.resolve_profile(&token).await {
            ProfileOutcome::Resolved(user) => {
                self.platform
                    .notify(Toast::success(format!("Welcome back, {}", user.display_name())));
                self.navigate_to(AppRoute::auth_success_redirect());
            }
            ProfileOutcome::Missing => self.navigate_to(AppRoute::profile_setup_redirect()),
            ProfileOutcome::Failed(msg) => self.platform.notify(Toast::error(msg)),
            ProfileOutcome::InProgress | ProfileOutcome::Superseded => {}
        }
    }

    /// 资料创建或更新成功后重新解析
    ///
    /// 刚报告成功却取不到资料，视为会话已损坏，强制登出。
    /// 保存前发出的请求可能返回旧资料，所以先递增代数让其作废。
    pub async fn on_profile_saved(&self) {
        let Some(token) = self.store.snapshot().token else {
            self.force_logout();
            return;
        };
        self.next_generation();

        match self.resolve_profile(&token).await {
            ProfileOutcome::Resolved(_) => self.navigate_to(AppRoute::Profile),
            ProfileOutcome::Missing => {
                self.platform
                    .notify(Toast::error("Profile was saved but could not be loaded"));
                self.force_logout();
            }
            ProfileOutcome::Failed(msg) => {
                self.platform.notify(Toast::error(msg));
                self.force_logout();
            }
            ProfileOutcome::InProgress | ProfileOutcome::Superseded => {}
        }
    }

    /// 登出
    ///
    /// 有令牌时 `initializing` 重新置为真，下一次渲染显示加载而不是旧的页面，
    /// 直到令牌变化触发的 [`initialize`](Self::initialize) 完成。
    /// 本来就没有令牌时不会触发重新初始化，直接结束加载。
    pub fn logout(&self) {
        info!("[Session] Logging out.");
        let had_token = self.store.snapshot().token.is_some();
        self.platform.clear_token();
        self.next_generation();
        self.store.update(|state| {
            state.token = None;
            state.user = None;
            state.profile_missing = false;
            state.initializing = had_token;
        });
        self.navigate_to(AppRoute::auth_failure_redirect());
    }

    fn force_logout(&self) {
        warn!("[Session] Session is no longer valid, forcing logout.");
        self.logout();
    }
}
