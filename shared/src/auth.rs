//! 认证状态模块
//!
//! 认证状态由外部认证存储独占持有和修改，路由守卫只读取快照。

/// 认证状态快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthState {
    /// 是否已认证
    pub is_authenticated: bool,
    /// 认证状态是否仍在解析中
    pub is_loading: bool,
}

impl AuthState {
    /// 正在解析认证状态（应用启动时的初始状态）
    pub const fn resolving() -> Self {
        Self {
            is_authenticated: false,
            is_loading: true,
        }
    }

    /// 已解析：已认证
    pub const fn authenticated() -> Self {
        Self {
            is_authenticated: true,
            is_loading: false,
        }
    }

    /// 已解析：未认证
    pub const fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            is_loading: false,
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::resolving()
    }
}

/// 认证状态提供者
///
/// 以能力的形式注入路由守卫，而不是读取全局单例，
/// 因此守卫可以直接用合成的状态做单元测试。
pub trait AuthStateProvider {
    /// 读取当前认证状态
    fn auth_state(&self) -> AuthState;
}

impl AuthStateProvider for AuthState {
    fn auth_state(&self) -> AuthState {
        *self
    }
}

impl<P: AuthStateProvider + ?Sized> AuthStateProvider for &P {
    fn auth_state(&self) -> AuthState {
        (**self).auth_state()
    }
}
