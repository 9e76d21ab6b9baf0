//! 路由定义模块 - 领域模型
//!
//! 定义了应用的所有路由、守卫类型、布局外壳和对应视图。
//! 路由之间路径互不相交，匹配与顺序无关。

use std::fmt::Display;

/// 通配路由的路径模式
pub const WILDCARD: &str = "*";

/// 可懒加载的视图标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Login,
    Register,
    Dashboard,
    Transactions,
    Categories,
    Settings,
    NotFound,
}

impl ViewId {
    /// 所有视图
    pub const ALL: [ViewId; 7] = [
        ViewId::Login,
        ViewId::Register,
        ViewId::Dashboard,
        ViewId::Transactions,
        ViewId::Categories,
        ViewId::Settings,
        ViewId::NotFound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
            Self::Transactions => "transactions",
            Self::Categories => "categories",
            Self::Settings => "settings",
            Self::NotFound => "not-found",
        }
    }
}

impl Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 路由守卫类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// 仅限未认证用户（登录、注册）
    GuestOnly,
    /// 仅限已认证用户
    Protected,
    /// 不做限制
    Open,
}

/// 视图外层的布局外壳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 认证页外壳（AuthLayout）
    Auth,
    /// 应用主外壳（AppLayout）
    App,
    /// 无外壳
    Bare,
}

/// 路由目标：渲染视图或者重定向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(ViewId),
    Redirect(AppRoute),
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    Login,
    Register,
    /// 索引页 `/`，本身不渲染，总是重定向到面板
    Index,
    Dashboard,
    Transactions,
    Categories,
    Settings,
    /// 通配路由，匹配一切未知路径
    #[default]
    NotFound,
}

impl AppRoute {
    /// 所有路由（通配路由在最后）
    pub const ALL: [AppRoute; 8] = [
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Index,
        AppRoute::Dashboard,
        AppRoute::Transactions,
        AppRoute::Categories,
        AppRoute::Settings,
        AppRoute::NotFound,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// 忽略查询串、片段和末尾斜杠，大小写不敏感；未命中时返回 `NotFound`。
    pub fn from_path(path: &str) -> Self {
        let path = normalize_path(path);
        Self::ALL
            .into_iter()
            .filter(|route| *route != Self::NotFound)
            .find(|route| route.path().eq_ignore_ascii_case(path))
            .unwrap_or(Self::NotFound)
    }

    /// 获取路由对应的路径模式
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Index => "/",
            Self::Dashboard => "/dashboard",
            Self::Transactions => "/transactions",
            Self::Categories => "/categories",
            Self::Settings => "/settings",
            Self::NotFound => WILDCARD,
        }
    }

    /// **核心守卫定义：该路由对认证状态的要求**
    pub fn gate(&self) -> Gate {
        match self {
            Self::Login | Self::Register => Gate::GuestOnly,
            Self::Index
            | Self::Dashboard
            | Self::Transactions
            | Self::Categories
            | Self::Settings => Gate::Protected,
            Self::NotFound => Gate::Open,
        }
    }

    pub fn layout(&self) -> Layout {
        match self.gate() {
            Gate::GuestOnly => Layout::Auth,
            Gate::Protected => Layout::App,
            Gate::Open => Layout::Bare,
        }
    }

    pub fn target(&self) -> RouteTarget {
        match self {
            Self::Index => RouteTarget::Redirect(Self::Dashboard),
            Self::Login => RouteTarget::View(ViewId::Login),
            Self::Register => RouteTarget::View(ViewId::Register),
            Self::Dashboard => RouteTarget::View(ViewId::Dashboard),
            Self::Transactions => RouteTarget::View(ViewId::Transactions),
            Self::Categories => RouteTarget::View(ViewId::Categories),
            Self::Settings => RouteTarget::View(ViewId::Settings),
            Self::NotFound => RouteTarget::View(ViewId::NotFound),
        }
    }

    /// 路由渲染的视图（重定向路由没有视图）
    pub fn view(&self) -> Option<ViewId> {
        match self.target() {
            RouteTarget::View(id) => Some(id),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取已认证用户离开仅访客页面时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// 去掉查询串和片段，得到与 `location.pathname` 对应的部分
pub fn pathname(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// 规范化路径用于匹配
///
/// 去掉查询串和片段，去掉末尾斜杠（根路径除外）。空路径视为 `/`。
pub fn normalize_path(path: &str) -> &str {
    let trimmed = pathname(path).trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// 两个路径在路由匹配意义下是否相同（大小写、末尾斜杠、查询串均不计）
pub fn same_path(a: &str, b: &str) -> bool {
    normalize_path(a).eq_ignore_ascii_case(normalize_path(b))
}
