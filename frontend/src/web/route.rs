//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、它们的守卫，以及根据会话状态选择视图的规则。

use std::fmt::Display;

use crate::session::SessionState;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    VerifyEmail,
    About,
    Timeline,
    Home,
    CreateProfile,
    Profile,
    Sprints,
    CreateSprint,
    Projects,
    PersonalTasks,
    Support,
    Admin,
    AdminReport,
    AdminTimeline,
}

/// 进入路由前需要满足的条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// 无需登录
    Public,
    /// 需要令牌
    Token,
    /// 需要令牌和用户资料
    Member,
    /// 需要令牌、用户资料以及管理员角色
    Admin,
}

impl AppRoute {
    pub const ALL: [AppRoute; 18] = [
        Self::Login,
        Self::Register,
        Self::ForgotPassword,
        Self::ResetPassword,
        Self::VerifyEmail,
        Self::About,
        Self::Timeline,
        Self::Home,
        Self::CreateProfile,
        Self::Profile,
        Self::Sprints,
        Self::CreateSprint,
        Self::Projects,
        Self::PersonalTasks,
        Self::Support,
        Self::Admin,
        Self::AdminReport,
        Self::AdminTimeline,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段和结尾的 `/`。未知路径返回 `None`。
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize_path(path);
        let route = match path {
            "/" | "/homepage" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/forgot-password" => Self::ForgotPassword,
            "/reset-password" => Self::ResetPassword,
            "/verify-email" => Self::VerifyEmail,
            "/about" => Self::About,
            "/timeline" => Self::Timeline,
            "/create-profile" => Self::CreateProfile,
            "/profile" => Self::Profile,
            "/sprints" => Self::Sprints,
            "/create-sprint" => Self::CreateSprint,
            "/projects" => Self::Projects,
            "/personal-tasks" => Self::PersonalTasks,
            "/support" => Self::Support,
            "/admin" => Self::Admin,
            "/admin/report" => Self::AdminReport,
            "/admin/timeline" => Self::AdminTimeline,
            _ => return None,
        };
        Some(route)
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::VerifyEmail => "/verify-email",
            Self::About => "/about",
            Self::Timeline => "/timeline",
            Self::Home => "/homepage",
            Self::CreateProfile => "/create-profile",
            Self::Profile => "/profile",
            Self::Sprints => "/sprints",
            Self::CreateSprint => "/create-sprint",
            Self::Projects => "/projects",
            Self::PersonalTasks => "/personal-tasks",
            Self::Support => "/support",
            Self::Admin => "/admin",
            Self::AdminReport => "/admin/report",
            Self::AdminTimeline => "/admin/timeline",
        }
    }

    /// 页面标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Create account",
            Self::ForgotPassword => "Forgot password",
            Self::ResetPassword => "Reset password",
            Self::VerifyEmail => "Verify email",
            Self::About => "About",
            Self::Timeline => "Timeline",
            Self::Home => "Home",
            Self::CreateProfile => "Create profile",
            Self::Profile => "Profile",
            Self::Sprints => "Sprints",
            Self::CreateSprint => "New sprint",
            Self::Projects => "Projects",
            Self::PersonalTasks => "Personal tasks",
            Self::Support => "Support",
            Self::Admin => "Administration",
            Self::AdminReport => "Reports",
            Self::AdminTimeline => "Admin timeline",
        }
    }

    /// **核心守卫逻辑：定义该路由的访问条件**
    pub fn guard(&self) -> RouteGuard {
        match self {
            Self::Login
            | Self::Register
            | Self::ForgotPassword
            | Self::ResetPassword
            | Self::VerifyEmail
            | Self::About
            | Self::Timeline => RouteGuard::Public,
            Self::CreateProfile => RouteGuard::Token,
            Self::Home
            | Self::Profile
            | Self::Sprints
            | Self::CreateSprint
            | Self::Projects
            | Self::PersonalTasks
            | Self::Support => RouteGuard::Member,
            Self::Admin | Self::AdminReport | Self::AdminTimeline => RouteGuard::Admin,
        }
    }

    /// 未登录也可访问的路由
    pub fn is_public(&self) -> bool {
        self.guard() == RouteGuard::Public
    }

    /// 定义已认证用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// 有令牌但没有资料时的重定向目标
    pub fn profile_setup_redirect() -> Self {
        Self::CreateProfile
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 去掉查询串、片段和结尾的 `/`
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// 路径在公开白名单内（未知路径不算公开）
pub fn is_public_path(path: &str) -> bool {
    AppRoute::from_path(path).is_some_and(|r| r.is_public())
}

// ============================================================================
// 视图分发
// ============================================================================

/// 分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSelection {
    /// 会话仍在初始化，显示整页加载
    Loading,
    /// 需要跳转到另一个路由
    Redirect(AppRoute),
    /// 渲染该路由的页面
    Render(AppRoute),
    /// 路由已匹配但资料尚未就绪，页面位置显示加载
    InlineLoading,
    /// 未知路径
    NotFound,
}

/// 根据路径和会话状态选择视图
///
/// 规则按顺序短路：
/// 1. 初始化中 → 加载
/// 2. 受保护路由且无令牌 → 登录页
/// 3. 登录/注册页且会话完整 → 首页
/// 4. 有令牌无资料，且不是公开页或创建资料页 → 创建资料页
/// 5. 已知路由 → 按路由守卫渲染
/// 6. 未知路径 → 会话完整时回首页，否则 404
pub fn dispatch_view(path: &str, session: &SessionState) -> ViewSelection {
    if session.initializing {
        return ViewSelection::Loading;
    }

    let has_token = session.token.is_some();
    let has_user = session.user.is_some();

    let Some(route) = AppRoute::from_path(path) else {
        if has_token && has_user {
            return ViewSelection::Redirect(AppRoute::auth_success_redirect());
        }
        if has_token {
            return ViewSelection::Redirect(AppRoute::profile_setup_redirect());
        }
        return ViewSelection::NotFound;
    };

    if !route.is_public() && !has_token {
        return ViewSelection::Redirect(AppRoute::auth_failure_redirect());
    }

    if route.should_redirect_when_authenticated() && has_token && has_user {
        return ViewSelection::Redirect(AppRoute::auth_success_redirect());
    }

    if has_token && !has_user && !route.is_public() && route != AppRoute::CreateProfile {
        return ViewSelection::Redirect(AppRoute::profile_setup_redirect());
    }

    match route.guard() {
        RouteGuard::Public => ViewSelection::Render(route),
        RouteGuard::Token if has_token => ViewSelection::Render(route),
        RouteGuard::Token => ViewSelection::Redirect(AppRoute::auth_failure_redirect()),
        RouteGuard::Member if has_token && has_user => ViewSelection::Render(route),
        RouteGuard::Member => ViewSelection::InlineLoading,
        RouteGuard::Admin => match &session.user {
            Some(user) if has_token && user.is_admin() => ViewSelection::Render(route),
            Some(_) if has_token => ViewSelection::Redirect(AppRoute::auth_success_redirect()),
            _ => ViewSelection::InlineLoading,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_shared::{Role, UserProfile};

    fn user(role: Role) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "A".into(),
            email: "a@example.com".into(),
            role,
            department: None,
            phone: None,
            created_at: None,
        }
    }

    fn session(token: Option<&str>, user: Option<UserProfile>) -> SessionState {
        SessionState {
            token: token.map(str::to_string),
            user,
            initializing: false,
            ..SessionState::default()
        }
    }

    #[test]
    fn path_round_trip_for_every_route() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(route.to_path()), Some(route));
        }
    }

    #[test]
    fn path_normalization() {
        assert_eq!(AppRoute::from_path("/"), Some(AppRoute::Home));
        assert_eq!(AppRoute::from_path("/sprints/"), Some(AppRoute::Sprints));
        assert_eq!(
            AppRoute::from_path("/reset-password?token=abc"),
            Some(AppRoute::ResetPassword)
        );
        assert_eq!(AppRoute::from_path("/about#team"), Some(AppRoute::About));
        assert_eq!(AppRoute::from_path("/xyz"), None);
    }

    #[test]
    fn public_allow_list() {
        let public: Vec<_> = AppRoute::ALL.iter().filter(|r| r.is_public()).collect();
        assert_eq!(public.len(), 7);
        for path in [
            "/login",
            "/register",
            "/forgot-password",
            "/reset-password",
            "/verify-email",
            "/about",
            "/timeline",
        ] {
            assert!(is_public_path(path), "{path} should be public");
        }
        assert!(!is_public_path("/xyz"));
        assert!(!is_public_path("/admin/timeline"));
    }

    #[test]
    fn initializing_always_shows_loading() {
        let mut state = session(None, None);
        state.initializing = true;
        for route in AppRoute::ALL {
            assert_eq!(dispatch_view(route.to_path(), &state), ViewSelection::Loading);
        }
    }

    #[test]
    fn public_paths_never_redirect_to_login_without_token() {
        let state = session(None, None);
        for route in AppRoute::ALL.iter().filter(|r| r.is_public()) {
            assert_eq!(
                dispatch_view(route.to_path(), &state),
                ViewSelection::Render(*route)
            );
        }
    }

    #[test]
    fn protected_paths_redirect_to_login_without_token() {
        let state = session(None, None);
        for route in AppRoute::ALL.iter().filter(|r| !r.is_public()) {
            assert_eq!(
                dispatch_view(route.to_path(), &state),
                ViewSelection::Redirect(AppRoute::Login)
            );
        }
    }

    #[test]
    fn homepage_without_token_redirects_to_login() {
        let state = session(None, None);
        assert_eq!(
            dispatch_view("/homepage", &state),
            ViewSelection::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn login_with_full_session_redirects_home() {
        let state = session(Some("abc"), Some(user(Role::Employee)));
        assert_eq!(
            dispatch_view("/login", &state),
            ViewSelection::Redirect(AppRoute::Home)
        );
        assert_eq!(
            dispatch_view("/register", &state),
            ViewSelection::Redirect(AppRoute::Home)
        );
    }

    #[test]
    fn token_without_profile_redirects_to_create_profile() {
        let state = session(Some("abc"), None);
        assert_eq!(
            dispatch_view("/sprints", &state),
            ViewSelection::Redirect(AppRoute::CreateProfile)
        );
        assert_eq!(
            dispatch_view("/create-profile", &state),
            ViewSelection::Render(AppRoute::CreateProfile)
        );
        // 公开页不受影响，登录流程在等待资料时停留在登录页
        assert_eq!(
            dispatch_view("/login", &state),
            ViewSelection::Render(AppRoute::Login)
        );
    }

    #[test]
    fn full_session_renders_member_routes() {
        let state = session(Some("abc"), Some(user(Role::Employee)));
        assert_eq!(
            dispatch_view("/projects", &state),
            ViewSelection::Render(AppRoute::Projects)
        );
        assert_eq!(
            dispatch_view("/create-profile", &state),
            ViewSelection::Render(AppRoute::CreateProfile)
        );
    }

    #[test]
    fn admin_routes_require_admin_role() {
        let employee = session(Some("abc"), Some(user(Role::Employee)));
        assert_eq!(
            dispatch_view("/admin/report", &employee),
            ViewSelection::Redirect(AppRoute::Home)
        );

        let admin = session(Some("abc"), Some(user(Role::Admin)));
        assert_eq!(
            dispatch_view("/admin/report", &admin),
            ViewSelection::Render(AppRoute::AdminReport)
        );
    }

    #[test]
    fn guard_table() {
        assert_eq!(AppRoute::CreateProfile.guard(), RouteGuard::Token);
        assert_eq!(AppRoute::Home.guard(), RouteGuard::Member);
        assert_eq!(AppRoute::AdminTimeline.guard(), RouteGuard::Admin);
        assert_eq!(AppRoute::Timeline.guard(), RouteGuard::Public);
    }

    #[test]
    fn user_without_token_is_treated_as_guest() {
        let state = session(None, Some(user(Role::Admin)));
        assert_eq!(
            dispatch_view("/profile", &state),
            ViewSelection::Redirect(AppRoute::Login)
        );
        assert_eq!(dispatch_view("/xyz", &state), ViewSelection::NotFound);
    }

    #[test]
    fn unknown_path_depends_on_session() {
        let full = session(Some("abc"), Some(user(Role::Employee)));
        assert_eq!(
            dispatch_view("/xyz", &full),
            ViewSelection::Redirect(AppRoute::Home)
        );

        let guest = session(None, None);
        assert_eq!(dispatch_view("/xyz", &guest), ViewSelection::NotFound);

        let pending = session(Some("abc"), None);
        assert_eq!(
            dispatch_view("/xyz", &pending),
            ViewSelection::Redirect(AppRoute::CreateProfile)
        );
    }
}
