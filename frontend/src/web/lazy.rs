//! 懒加载视图模块
//!
//! 视图代码在首次导航时才获取。`ViewRegistry` 把 `ViewId` 映射到异步加载器，
//! 每个加载器最多执行一次，结果被之后所有的加载请求共享。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use expense_manager_shared::ViewId;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

/// 视图加载错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewLoadError {
    /// 视图未注册加载器
    #[error("视图 {0} 未注册")]
    Unregistered(ViewId),
    /// 加载器执行失败
    #[error("视图 {view} 加载失败: {message}")]
    Fetch { view: ViewId, message: String },
}

/// 加载结果
pub type LoadResult<V> = Result<V, ViewLoadError>;

type ViewFuture<V> = LocalBoxFuture<'static, LoadResult<V>>;
type ViewLoader<V> = Rc<dyn Fn() -> ViewFuture<V>>;

/// 加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<V> {
    Pending,
    Ready(V),
    Failed(ViewLoadError),
}

/// 加载句柄
///
/// 克隆廉价，所有克隆共享同一个加载过程。
pub struct LoadHandle<V> {
    inner: Shared<ViewFuture<V>>,
}

impl<V> Clone for LoadHandle<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: Clone + 'static> LoadHandle<V> {
    fn new(future: ViewFuture<V>) -> Self {
        Self {
            inner: future.shared(),
        }
    }

    fn failed(error: ViewLoadError) -> Self {
        Self::new(futures::future::ready(Err(error)).boxed_local())
    }

    /// 当前状态（不驱动加载）
    pub fn state(&self) -> LoadState<V> {
        match self.inner.peek() {
            None => LoadState::Pending,
            Some(Ok(view)) => LoadState::Ready(view.clone()),
            Some(Err(e)) => LoadState::Failed(e.clone()),
        }
    }

    /// 等待加载完成
    pub async fn resolve(self) -> LoadResult<V> {
        self.inner.await
    }

    /// 轮询一次；已就绪的视图可以同步渲染，跳过加载占位
    pub fn now_or_never(&self) -> Option<LoadResult<V>> {
        self.inner.clone().now_or_never()
    }
}

/// 异步视图提供者
pub trait ViewProvider<V> {
    fn load(&self, id: ViewId) -> LoadHandle<V>;
}

/// 视图注册表
pub struct ViewRegistry<V> {
    loaders: HashMap<ViewId, ViewLoader<V>>,
    cache: RefCell<HashMap<ViewId, LoadHandle<V>>>,
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self {
            loaders: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<V: Clone + 'static> ViewRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册视图加载器（同一视图重复注册时后者覆盖前者）
    pub fn register<F, Fut>(mut self, id: ViewId, loader: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = LoadResult<V>> + 'static,
    {
        self.loaders
            .insert(id, Rc::new(move || loader().boxed_local()));
        self
    }

    pub fn is_registered(&self, id: ViewId) -> bool {
        self.loaders.contains_key(&id)
    }
}

impl<V: Clone + 'static> ViewProvider<V> for ViewRegistry<V> {
    fn load(&self, id: ViewId) -> LoadHandle<V> {
        if let Some(handle) = self.cache.borrow().get(&id) {
            return handle.clone();
        }

        let handle = match self.loaders.get(&id) {
            Some(loader) => {
                log::debug!("[Views] 首次加载视图 {}", id);
                LoadHandle::new(loader())
            }
            None => {
                log::error!("[Views] 视图 {} 没有注册加载器", id);
                LoadHandle::failed(ViewLoadError::Unregistered(id))
            }
        };
        self.cache.borrow_mut().insert(id, handle.clone());
        handle
    }
}
