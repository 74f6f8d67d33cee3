use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 时钟抽象, 过期判断不依赖真实时间, 测试可手动拨动
pub trait Clock: Send + Sync {
    /// 当前 Unix 时间戳, 毫秒
    fn now_ms(&self) -> i64;
}

/// 系统时钟
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// 带过期时间的缓存条目
///
/// 不变量: 仅当 now < expires_at_ms 时有效, 过期或无法解析的条目
/// 一律当作不存在处理并清除。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at_ms: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            value,
            expires_at_ms: now_ms + ttl_ms,
        }
    }

    pub fn is_valid(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }
}
