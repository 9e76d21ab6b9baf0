//! 路由守卫模块
//!
//! 把 (认证状态, 请求路径) 映射为唯一的导航决策。
//! 每次认证状态或路径变化时都会重新求值。

use std::fmt::Display;

use crate::auth::AuthStateProvider;
use crate::route::{AppRoute, Gate, RouteTarget, ViewId};

/// 导航阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    /// 认证状态解析中
    ResolvingAuth,
    /// 正在重定向
    Redirecting,
    /// 正在渲染视图
    Rendering,
}

/// 导航决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// 显示全屏加载占位
    Loading,
    /// 重定向到指定路由（替换当前历史记录）
    Redirect(AppRoute),
    /// 渲染路由对应的视图
    Render { route: AppRoute, view: ViewId },
}

impl Decision {
    pub fn phase(&self) -> NavigationPhase {
        match self {
            Self::Loading => NavigationPhase::ResolvingAuth,
            Self::Redirect(_) => NavigationPhase::Redirecting,
            Self::Render { .. } => NavigationPhase::Rendering,
        }
    }

    /// 重定向目标路径（非重定向决策返回 `None`）
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::Redirect(target) => Some(target.path()),
            _ => None,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Redirect(target) => write!(f, "redirect -> {}", target),
            Self::Render { route, view } => write!(f, "render {} ({})", view, route),
        }
    }
}

/// **核心守卫逻辑**
///
/// 顺序固定：先检查加载状态，再检查守卫，最后处理路由自身的重定向。
/// 因此短暂的加载状态永远不会产生错误的重定向。
pub fn decide<P: AuthStateProvider + ?Sized>(auth: &P, path: &str) -> Decision {
    let state = auth.auth_state();
    if state.is_loading {
        return Decision::Loading;
    }

    let route = AppRoute::from_path(path);
    match route.gate() {
        Gate::Protected if !state.is_authenticated => {
            return Decision::Redirect(AppRoute::auth_failure_redirect());
        }
        Gate::GuestOnly if state.is_authenticated => {
            return Decision::Redirect(AppRoute::auth_success_redirect());
        }
        _ => {}
    }

    match route.target() {
        RouteTarget::Redirect(target) => Decision::Redirect(target),
        RouteTarget::View(view) => Decision::Render { route, view },
    }
}
