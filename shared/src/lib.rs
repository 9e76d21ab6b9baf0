//! Expense Manager 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM、web_sys 或 UI 框架：
//! - `auth`: 认证状态快照与提供者抽象
//! - `route`: 静态路由表
//! - `gate`: 路由守卫决策

pub mod auth;
pub mod gate;
pub mod route;

// =========================================================
// 公共导出 (Re-exports)
// =========================================================

pub use auth::{AuthState, AuthStateProvider};
pub use gate::{Decision, NavigationPhase, decide};
pub use route::{AppRoute, Gate, Layout, RouteTarget, ViewId, normalize_path, pathname, same_path};
