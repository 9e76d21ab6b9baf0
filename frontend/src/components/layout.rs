//! 布局外壳
//!
//! `AppLayout` 包裹所有受保护页面，`AuthLayout` 包裹登录与注册页面。

use crate::auth::{logout, use_auth, use_session};
use crate::config::use_config;
use crate::web::router::Link;
use expense_manager_shared::AppRoute;
use leptos::prelude::*;

const NAV_ITEMS: [(AppRoute, &str); 4] = [
    (AppRoute::Dashboard, "Dashboard"),
    (AppRoute::Transactions, "Transactions"),
    (AppRoute::Categories, "Categories"),
    (AppRoute::Settings, "Settings"),
];

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let auth = use_auth();
    let session = use_session();
    let config = use_config();

    // 注销后由路由服务自动重定向到登录页
    let on_logout = move |_| logout(&auth, &session);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <span class="btn btn-ghost text-xl">{config.app_name}</span>
                        <ul class="menu menu-horizontal px-1 hidden md:flex">
                            {NAV_ITEMS
                                .into_iter()
                                .map(|(route, label)| {
                                    view! {
                                        <li>
                                            <Link to=route.path()>{label}</Link>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </div>
                    <div class="flex-none">
                        <button on:click=on_logout class="btn btn-outline btn-error">
                            "Sign out"
                        </button>
                    </div>
                </div>
                <main>{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    let config = use_config();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">{config.app_name}</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">{children()}</div>
            </div>
        </div>
    }
}
