use std::collections::HashMap;
use std::sync::RwLock;

/// 本地键值存储抽象
///
/// 对应浏览器 localStorage 的语义: 字符串键值, 同步读写。
/// 令牌、登录ID、用户信息缓存都经过这一层, 测试可以直接注入和篡改。
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}

/// 进程内存储实现
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().expect("storage lock poisoned");
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().expect("storage lock poisoned");
        entries.remove(key);
    }

    fn clear(&self) {
        let mut entries = self.entries.write().expect("storage lock poisoned");
        entries.clear();
    }
}
