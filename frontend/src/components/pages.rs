//! 应用页面
//!
//! 页面内容由各自的功能模块负责，这里只提供路由可挂载的页面外壳。

use crate::web::router::{Link, use_router};
use expense_manager_shared::AppRoute;
use leptos::prelude::*;

#[component]
fn PageHeader(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">{title}</h2>
                <p class="text-base-content/70">{subtitle}</p>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! { <PageHeader title="Dashboard" subtitle="Your balance, recent activity and budgets at a glance." /> }
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    view! { <PageHeader title="Transactions" subtitle="Every income and expense entry." /> }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    view! { <PageHeader title="Categories" subtitle="Group transactions the way you think about money." /> }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! { <PageHeader title="Settings" subtitle="Profile, currency and preferences." /> }
}

/// 未知路径：地址栏中的原始路径保持不变
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let path = use_router().current_path();

    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <p class="font-mono text-base-content/60 mt-2">{move || path.get()}</p>
                <Link to=AppRoute::Index.path() class="btn btn-primary mt-6">"Back to home"</Link>
            </div>
        </div>
    }
}
