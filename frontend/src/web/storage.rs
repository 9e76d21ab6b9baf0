//! 本地存储封装模块
//!
//! 使用 `gloo-storage` 访问浏览器 LocalStorage，
//! 并通过 `KeyValueStorage` 抽象与会话逻辑解耦（测试中使用内存实现）。

use gloo_storage::{LocalStorage as GlooLocalStorage, Storage};

/// 键值存储接口
pub trait KeyValueStorage {
    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    fn get(&self, key: &str) -> Option<String>;

    /// 设置存储值，返回操作是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除存储的键值对
    fn delete(&self, key: &str);
}

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        GlooLocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match GlooLocalStorage::set(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Storage] 写入 {} 失败: {}", key, e);
                false
            }
        }
    }

    fn delete(&self, key: &str) {
        GlooLocalStorage::delete(key);
    }
}

/// 会话令牌存储
///
/// 把存储后端和存储键绑定在一起，供认证模块使用。
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// 读取令牌，空字符串视为无令牌
    pub fn load(&self) -> Option<String> {
        self.storage.get(&self.key).filter(|token| !token.is_empty())
    }

    pub fn save(&self, token: &str) -> bool {
        self.storage.set(&self.key, token)
    }

    pub fn clear(&self) {
        self.storage.delete(&self.key);
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存存储（测试用）
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        items: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        pub fn raw(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.raw(key)
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }

    #[test]
    fn session_round_trip() {
        let storage = MemoryStorage::default();
        let session = SessionStore::new(storage.clone(), "token");

        assert_eq!(session.load(), None);
        assert!(session.save("abc"));
        assert_eq!(session.load().as_deref(), Some("abc"));
        assert_eq!(storage.raw("token").as_deref(), Some("abc"));

        session.clear();
        assert_eq!(session.load(), None);
        assert_eq!(storage.raw("token"), None);
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let storage = MemoryStorage::default();
        storage.set("token", "");
        let session = SessionStore::new(storage, "token");
        assert_eq!(session.load(), None);
    }

    #[test]
    fn sessions_with_different_keys_do_not_collide() {
        let storage = MemoryStorage::default();
        let a = SessionStore::new(storage.clone(), "a");
        let b = SessionStore::new(storage, "b");
        a.save("one");
        assert_eq!(b.load(), None);
        b.save("two");
        a.clear();
        assert_eq!(b.load().as_deref(), Some("two"));
    }
}
