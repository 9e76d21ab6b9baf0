//! 加载占位组件

use crate::config::use_config;
use leptos::prelude::*;

/// 视图懒加载期间的占位
#[component]
pub fn PageLoader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 认证状态解析期间的全屏加载屏
#[component]
pub fn LoadingScreen() -> impl IntoView {
    let config = use_config();

    view! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <div class="text-center">
                <span class="loading loading-spinner loading-lg text-primary mb-4"></span>
                <h1 class="text-2xl font-bold mb-2">{config.app_name}</h1>
                <p class="text-base-content/60">{config.loading_message}</p>
            </div>
        </div>
    }
}
