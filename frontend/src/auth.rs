//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证状态信号执行守卫，认证模块从不主动导航。

use crate::web::{BrowserStorage, KeyValueStorage, SessionStore};
use expense_manager_shared::{AuthState, AuthStateProvider};
use leptos::prelude::*;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始状态为"解析中"
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::resolving());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn state_signal(&self) -> Signal<AuthState> {
        let ctx = *self;
        Signal::derive(move || ctx.auth_state())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateProvider for AuthContext {
    /// 响应式读取：在 Effect/Memo 中调用时会订阅状态变化
    fn auth_state(&self) -> AuthState {
        self.state.get()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 应用使用的会话存储（浏览器 LocalStorage）
pub type AppSession = SessionStore<BrowserStorage>;

/// 从 Context 获取会话存储
pub fn use_session() -> AppSession {
    use_context::<AppSession>().expect("AppSession should be provided")
}

/// 恢复会话
///
/// 从存储中读取上次的令牌并结束"解析中"状态。
pub fn restore_session<S: KeyValueStorage>(ctx: &AuthContext, session: &SessionStore<S>) {
    let restored = session.load().is_some();
    log::info!(
        "[Auth] 会话恢复完成: {}",
        if restored { "已认证" } else { "未认证" }
    );
    ctx.set_state.set(if restored {
        AuthState::authenticated()
    } else {
        AuthState::anonymous()
    });
}

/// 登录并保存令牌
///
/// # Returns
/// 令牌是否被接受（空令牌会被拒绝）
pub fn login<S: KeyValueStorage>(ctx: &AuthContext, session: &SessionStore<S>, token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return false;
    }

    if !session.save(token) {
        // 持久化失败时仍然在内存中登录，刷新页面后需要重新登录
        log::warn!("[Auth] 令牌未能持久化，本次会话仅保存在内存中");
    }
    ctx.set_state.set(AuthState::authenticated());
    true
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout<S: KeyValueStorage>(ctx: &AuthContext, session: &SessionStore<S>) {
    session.clear();
    ctx.set_state.set(AuthState::anonymous());
    log::info!("[Auth] 已注销");
}
