use crate::auth::use_session;
use crate::web::route::AppRoute;
use leptos::prelude::*;

/// 会话初始化期间的整页加载
#[component]
pub fn LoadingView() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 路由已匹配、资料未就绪时在页面位置显示的加载
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-16 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            <span class="ml-2">"Loading..."</span>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let session = use_session();

    let go_back = move |_| {
        let target = if session.state.get_untracked().token.is_some() {
            AppRoute::Home
        } else {
            AppRoute::Login
        };
        session.navigate_to(target);
    };

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <button class="btn btn-primary mt-6" on:click=go_back>
                    "Back to start"
                </button>
            </div>
        </div>
    }
}
