//! 页面外壳
//!
//! 业务页面（迭代、项目、管理等）由各自的表单组件实现，
//! 外壳负责标题、导航栏、当前用户和登出。

use crate::auth::use_session;
use crate::web::route::AppRoute;
use leptos::prelude::*;

/// 导航栏中的成员入口
const MEMBER_LINKS: [AppRoute; 5] = [
    AppRoute::Home,
    AppRoute::Sprints,
    AppRoute::Projects,
    AppRoute::PersonalTasks,
    AppRoute::Support,
];

/// 仅管理员可见的入口
const ADMIN_LINKS: [AppRoute; 3] = [AppRoute::Admin, AppRoute::AdminReport, AppRoute::AdminTimeline];

#[component]
fn NavLink(route: AppRoute, current: AppRoute) -> impl IntoView {
    let session = use_session();
    let class = if route == current {
        "btn btn-ghost btn-sm btn-active"
    } else {
        "btn btn-ghost btn-sm"
    };

    view! {
        <button class=class on:click=move |_| session.navigate_to(route)>
            {route.title()}
        </button>
    }
}

#[component]
pub fn PageShell(route: AppRoute) -> impl IntoView {
    let session = use_session();
    let user = move || session.current_user();
    let is_admin = move || session.state.with(|s| s.user.as_ref().is_some_and(|u| u.is_admin()));
    let signed_in = move || session.state.with(|s| s.token.is_some());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <a class="btn btn-ghost text-xl" on:click=move |_| session.navigate_to(AppRoute::Home)>
                            "SprintBoard"
                        </a>
                        <Show when=move || user().is_some()>
                            <div class="hidden md:flex gap-1">
                                {MEMBER_LINKS.iter().map(|&link| view! { <NavLink route=link current=route /> }).collect_view()}
                                <Show when=is_admin>
                                    {ADMIN_LINKS.iter().map(|&link| view! { <NavLink route=link current=route /> }).collect_view()}
                                </Show>
                            </div>
                        </Show>
                    </div>
                    <div class="flex-none gap-2">
                        <Show
                            when=signed_in
                            fallback=move || view! {
                                <button class="btn btn-primary btn-sm" on:click=move |_| session.navigate_to(AppRoute::Login)>
                                    "Sign in"
                                </button>
                            }
                        >
                            <span class="badge badge-neutral hidden md:inline-flex">
                                {move || user().map(|u| u.display_name().to_string()).unwrap_or_default()}
                            </span>
                            <button class="btn btn-ghost btn-sm" on:click=move |_| session.navigate_to(AppRoute::Profile)>
                                "Profile"
                            </button>
                            <button class="btn btn-outline btn-error btn-sm" on:click=move |_| session.logout()>
                                "Sign out"
                            </button>
                        </Show>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{route.title()}</h2>
                        <p class="text-base-content/60 font-mono text-sm">{route.to_path()}</p>
                        <Show when=move || user().is_some_and(|u| u.department.is_some())>
                            <p class="text-sm">
                                "Department: "
                                {move || user().and_then(|u| u.department).unwrap_or_default()}
                            </p>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
