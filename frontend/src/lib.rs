//! Expense Manager 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `expense_manager_shared`: 路由表与守卫决策（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `web::lazy`: 懒加载视图注册表
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

pub mod auth;
pub mod config;
mod components {
    pub mod layout;
    pub mod lazy_view;
    pub mod loader;
    pub mod login;
    pub mod pages;
}

use crate::auth::{AppSession, AuthContext, restore_session};
use crate::components::layout::{AppLayout, AuthLayout};
use crate::components::lazy_view::{LazyView, ViewFn, provide_views};
use crate::components::loader::LoadingScreen;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::pages::{
    CategoriesPage, DashboardPage, NotFoundPage, SettingsPage, TransactionsPage,
};
use crate::config::AppConfig;

use expense_manager_shared::{Layout, ViewId};
use leptos::prelude::*;

// 浏览器 API 与路由引擎
pub mod web {
    mod lazy;
    pub mod router;
    mod storage;

    pub use lazy::{LoadHandle, LoadResult, LoadState, ViewLoadError, ViewProvider, ViewRegistry};
    pub use storage::{BrowserStorage, KeyValueStorage, SessionStore};

    #[cfg(test)]
    pub use storage::tests::MemoryStorage;
}

use web::router::{Router, RouterOutlet};
use web::{LoadResult, ViewRegistry};

/// 路由匹配函数
///
/// 把视图包进懒加载边界，再套上路由对应的布局外壳。
/// 布局外壳：外壳在同一布局内保持挂载，仅内部视图随页面切换
fn layout_shell(layout: Layout, page: Memo<Option<ViewId>>) -> AnyView {
    let content = move || page.get().map(|id| view! { <LazyView id=id /> });
    match layout {
        Layout::App => view! { <AppLayout>{content}</AppLayout> }.into_any(),
        Layout::Auth => view! { <AuthLayout>{content}</AuthLayout> }.into_any(),
        Layout::Bare => content.into_any(),
    }
}

fn loading_screen() -> AnyView {
    view! { <LoadingScreen /> }.into_any()
}

/// 视图加载器
///
/// 页面代码与主包一同编译，加载器立即就绪；
/// 注册表保证每个视图只在首次导航时实例化加载过程。
async fn ready(view: ViewFn) -> LoadResult<ViewFn> {
    Ok(view)
}

fn view_registry() -> ViewRegistry<ViewFn> {
    ViewRegistry::new()
        .register(ViewId::Login, || ready(|| view! { <LoginPage /> }.into_any()))
        .register(ViewId::Register, || ready(|| view! { <RegisterPage /> }.into_any()))
        .register(ViewId::Dashboard, || ready(|| view! { <DashboardPage /> }.into_any()))
        .register(ViewId::Transactions, || {
            ready(|| view! { <TransactionsPage /> }.into_any())
        })
        .register(ViewId::Categories, || ready(|| view! { <CategoriesPage /> }.into_any()))
        .register(ViewId::Settings, || ready(|| view! { <SettingsPage /> }.into_any()))
        .register(ViewId::NotFound, || ready(|| view! { <NotFoundPage /> }.into_any()))
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 提供配置与会话存储
    let session = AppSession::new(web::BrowserStorage, config.token_storage_key.clone());
    provide_context(config);
    provide_context(session.clone());

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 提供视图注册表
    provide_views(view_registry());

    // 4. 恢复会话（结束"解析中"状态）
    restore_session(&auth_ctx, &session);

    // 5. 获取认证状态信号，用于注入路由服务（解耦！）
    let auth = auth_ctx.state_signal();

    view! {
        <div class="min-h-screen">
            <Router auth=auth>
                <RouterOutlet shell=layout_shell fallback=loading_screen />
            </Router>
        </div>
    }
}
