//! 懒加载视图边界
//!
//! 视图就绪时同步渲染；否则在 `Suspense` 中显示页面加载占位，直到视图可用。
//! 只挂起当前视图子树，界面其余部分保持可交互。

use crate::components::loader::PageLoader;
use crate::web::{LoadResult, ViewProvider, ViewRegistry};
use expense_manager_shared::ViewId;
use leptos::prelude::*;

/// 视图工厂
pub type ViewFn = fn() -> AnyView;

/// Context 中保存的视图注册表
type ViewStore = StoredValue<ViewRegistry<ViewFn>, LocalStorage>;

/// 提供视图注册表到 Context
pub fn provide_views(registry: ViewRegistry<ViewFn>) {
    provide_context::<ViewStore>(StoredValue::new_local(registry));
}

fn use_views() -> ViewStore {
    use_context::<ViewStore>().expect("ViewRegistry should be provided")
}

#[component]
pub fn LazyView(id: ViewId) -> impl IntoView {
    let handle = use_views().with_value(|registry| registry.load(id));

    if let Some(result) = handle.now_or_never() {
        return render_loaded(result);
    }

    let resource = LocalResource::new(move || handle.clone().resolve());
    view! {
        <Suspense fallback=|| view! { <PageLoader /> }>
            {move || Suspend::new(async move { render_loaded(resource.await) })}
        </Suspense>
    }
    .into_any()
}

fn render_loaded(result: LoadResult<ViewFn>) -> AnyView {
    match result {
        Ok(render) => render(),
        Err(e) => {
            log::error!("[Views] {}", e);
            view! {
                <div role="alert" class="alert alert-error m-8">
                    <span>"This page failed to load. Please refresh and try again."</span>
                </div>
            }
            .into_any()
        }
    }
}
