//! 路由服务模块 - 核心引擎
//!
//! 所有对 window.history 的操作都集中在 `BrowserHistory`，
//! 路由服务通过 `HistoryBackend` 使用它（测试中替换为记录型实现）。
//! 导航流程为"监听 -> 守卫决策 -> 重定向 / 渲染"，守卫决策由
//! `expense_manager_shared::decide` 完成，本模块只负责驱动。

use expense_manager_shared::{AppRoute, AuthState, Decision, Layout, ViewId, decide, pathname, same_path};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

// ============================================================================
// History 后端
// ============================================================================

/// History 后端接口
pub trait HistoryBackend {
    /// 当前路径（对应 `location.pathname`）
    fn current_path(&self) -> String;
    /// 推入新的历史记录
    fn push(&self, url: &str);
    /// 替换当前历史记录
    fn replace(&self, url: &str);
}

/// 浏览器 History API
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

impl HistoryBackend for BrowserHistory {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn push(&self, url: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }

    fn replace(&self, url: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

type HistoryStore = StoredValue<Box<dyn HistoryBackend>, LocalStorage>;

// ============================================================================
// 路由服务
// ============================================================================

/// 出口外层帧
///
/// 同一布局下切换页面时帧不变，布局外壳保持挂载，只替换内部视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletFrame {
    /// 认证状态解析中
    Loading,
    /// 重定向尚未落地
    Redirecting,
    /// 渲染指定布局外壳
    Shell(Layout),
}

impl OutletFrame {
    fn from_decision(decision: Decision) -> Self {
        match decision {
            Decision::Loading => Self::Loading,
            Decision::Redirect(_) => Self::Redirecting,
            Decision::Render { route, .. } => Self::Shell(route.layout()),
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证状态以信号形式注入，实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路径（只读信号），未知路径原样保留，不含查询串
    path: ReadSignal<String>,
    /// 设置当前路径（写入信号）
    set_path: WriteSignal<String>,
    /// 守卫决策，认证状态或路径变化时重新求值
    decision: Memo<Decision>,
    frame: Memo<OutletFrame>,
    page: Memo<Option<ViewId>>,
    history: HistoryStore,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `auth` - 认证状态信号，由外部注入实现解耦
    /// * `history` - History 后端
    fn new<H: HistoryBackend + 'static>(auth: Signal<AuthState>, history: H) -> Self {
        let (path, set_path) = signal(history.current_path());
        let decision = Memo::new(move |_| {
            let state = auth.get();
            path.with(|path| decide(&state, path))
        });
        let frame = Memo::new(move |_| OutletFrame::from_decision(decision.get()));
        let page = Memo::new(move |_| match decision.get() {
            Decision::Render { view, .. } => Some(view),
            _ => None,
        });
        let history: Box<dyn HistoryBackend> = Box::new(history);

        Self {
            path,
            set_path,
            decision,
            frame,
            page,
            history: StoredValue::new_local(history),
        }
    }

    /// 获取当前路径信号
    pub fn current_path(&self) -> ReadSignal<String> {
        self.path
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> Signal<AppRoute> {
        let path = self.path;
        Signal::derive(move || path.with(|path| AppRoute::from_path(path)))
    }

    /// 获取守卫决策
    pub fn decision(&self) -> Memo<Decision> {
        self.decision
    }

    pub fn frame(&self) -> Memo<OutletFrame> {
        self.frame
    }

    /// 当前渲染的视图（非渲染决策时为 `None`）
    pub fn page(&self) -> Memo<Option<ViewId>> {
        self.page
    }

    /// **核心方法：导航**
    ///
    /// 推入新的历史记录；守卫随后在 Effect 中对新路径求值，必要时替换为重定向目标。
    /// 与当前路径匹配意义相同的目标（大小写、末尾斜杠、查询串不同）不产生导航。
    pub fn navigate(&self, url: &str) {
        if self.path.with_untracked(|current| same_path(current, url)) {
            return;
        }
        log::debug!("[Router] Navigate to {}", url);
        self.history.with_value(|history| history.push(url));
        self.set_path.set(pathname(url).to_string());
    }

    /// 重定向：替换当前历史记录，不留下可后退的中间页
    fn redirect(&self, target: AppRoute) {
        self.history.with_value(|history| history.replace(target.path()));
        self.set_path.set(target.path().to_string());
    }

    /// 从 History 同步路径（后退/前进）
    ///
    /// 守卫由决策 Memo 统一处理，这里只同步路径。
    fn sync_from_history(&self) {
        let path = self.history.with_value(|history| history.current_path());
        self.set_path.set(path);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || router.sync_from_history());

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 守卫决策为重定向时执行重定向
    ///
    /// 认证状态变化（登录、注销、会话过期）和路径变化都会触发。
    fn setup_gate_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            if let Decision::Redirect(target) = router.decision.get() {
                let from = router.path.get_untracked();
                log::info!("[Router] {} -> {} (redirect)", from, target);
                router.redirect(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(auth: Signal<AuthState>) -> RouterService {
    let router = RouterService::new(auth, BrowserHistory);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_gate_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// 链接辅助
// ============================================================================

/// 链接点击的相关属性
#[derive(Debug, Clone, Copy, Default)]
struct LinkClick {
    button: i16,
    modified: bool,
    default_prevented: bool,
}

impl LinkClick {
    fn from_event(ev: &web_sys::MouseEvent) -> Self {
        Self {
            button: ev.button(),
            modified: ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.alt_key(),
            default_prevented: ev.default_prevented(),
        }
    }

    /// 只有普通左键点击在应用内导航，其余交给浏览器（如新标签页打开）
    fn handled_in_app(&self) -> bool {
        !self.default_prevented && self.button == 0 && !self.modified
    }
}

/// 链接的 `aria-current` 值
fn aria_current(current: AppRoute, target: AppRoute) -> Option<&'static str> {
    (target != AppRoute::NotFound && current == target).then_some("page")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    auth: Signal<AuthState>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 外层只随帧变化重建：解析中显示 `fallback`，重定向期间不渲染，
/// 其余交给 `shell` 渲染布局外壳，外壳内部根据 `page` 切换视图。
#[component]
pub fn RouterOutlet(
    /// 布局外壳：接收布局与当前视图信号
    shell: fn(Layout, Memo<Option<ViewId>>) -> AnyView,
    /// 认证解析期间的全屏占位
    fallback: fn() -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let frame = router.frame();
    let page = router.page();

    move || match frame.get() {
        OutletFrame::Loading => fallback(),
        OutletFrame::Redirecting => ().into_any(),
        OutletFrame::Shell(layout) => shell(layout, page),
    }
}

/// 客户端导航链接
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    /// CSS 类
    #[prop(optional, into)]
    class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let current = router.current_route();
    let target = AppRoute::from_path(&to);

    let href = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if !LinkClick::from_event(&ev).handled_in_app() {
            return;
        }
        ev.prevent_default();
        router.navigate(&to);
    };

    view! {
        <a href=href class=class aria-current=move || aria_current(current.get(), target) on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests;
