use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;

use crate::api::models::user::UserProfile;
use crate::api::operations::user::UserOperations;
use crate::cache::keys;
use crate::cache::models::{CacheEntry, Clock, SystemClock};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStorage;

/// 用户信息缓存
///
/// 读取顺序: 令牌 -> 本地缓存 -> 后端。缓存有效期内不发网络请求;
/// 过期、缺失或损坏的条目先清除再回源。并发 get() 共享一次回源,
/// 不会产生重复请求。
pub struct UserInfoCache {
    http: Client,
    config: Config,
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
    // 回源临界区, 持锁期间最多一个在途请求
    fetch_lock: Mutex<()>,
}

impl UserInfoCache {
    pub fn new(http: Client, config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_clock(http, config, storage, Arc::new(SystemClock))
    }

    pub fn with_clock(
        http: Client,
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            config,
            storage,
            clock,
            fetch_lock: Mutex::new(()),
        }
    }

    /// 读取当前用户信息
    ///
    /// 没有令牌直接返回 Unauthenticated; 缓存有效则直接命中;
    /// 否则回源并写入新缓存。回源失败时缓存保持清空, 不保留旧值。
    pub async fn get(&self) -> AppResult<UserProfile> {
        let token = self.token().ok_or(AppError::Unauthenticated)?;

        if let Some(profile) = self.read_valid_entry() {
            tracing::debug!("user info served from cache");
            return Ok(profile);
        }

        let _guard = self.fetch_lock.lock().await;
        // 等锁期间可能已有别的调用方完成回源
        if let Some(profile) = self.read_valid_entry() {
            return Ok(profile);
        }
        self.fetch_and_store(&token).await
    }

    /// 强制刷新
    ///
    /// 先清掉现有条目再回源, 登录/登出/修改信息之后必须调用,
    /// 保证后续读取不会拿到旧值。
    pub async fn refresh(&self) -> AppResult<UserProfile> {
        self.remove_entry();

        let token = self.token().ok_or(AppError::Unauthenticated)?;
        let _guard = self.fetch_lock.lock().await;
        self.fetch_and_store(&token).await
    }

    /// 清除缓存和全部身份信息, 不发起任何请求
    pub fn invalidate(&self) {
        self.storage.remove(keys::TOKEN_KEY);
        self.storage.remove(keys::LOGIN_ID_KEY);
        self.remove_entry();
    }

    /// 只读缓存命中, 不触发网络请求
    ///
    /// 会话层用它判断跳过/地图按钮是否可用。
    pub fn cached(&self) -> Option<UserProfile> {
        if self.token().is_none() {
            return None;
        }
        self.read_valid_entry()
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(keys::TOKEN_KEY)
    }

    fn read_valid_entry(&self) -> Option<UserProfile> {
        let raw = self.storage.get(keys::USER_INFO_KEY)?;
        let expiry = self.storage.get(keys::USER_INFO_EXPIRY_KEY);

        let expires_at_ms = match expiry.and_then(|v| v.parse::<i64>().ok()) {
            Some(ms) => ms,
            None => {
                tracing::warn!("user info cache has no readable expiry, purging");
                self.remove_entry();
                return None;
            }
        };

        let value = match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("corrupt user info cache, purging: {}", e);
                self.remove_entry();
                return None;
            }
        };

        let entry = CacheEntry {
            value,
            expires_at_ms,
        };
        if !entry.is_valid(self.clock.now_ms()) {
            self.remove_entry();
            return None;
        }
        Some(entry.value)
    }

    async fn fetch_and_store(&self, token: &str) -> AppResult<UserProfile> {
        tracing::debug!("fetching user info from backend");
        match UserOperations::fetch_profile(&self.http, &self.config, token).await {
            Ok(profile) => {
                self.store_entry(&profile);
                Ok(profile)
            }
            Err(e) => {
                // 失败后不能留下半新不旧的条目
                self.remove_entry();
                Err(e)
            }
        }
    }

    fn store_entry(&self, profile: &UserProfile) {
        let entry = CacheEntry::new(profile, self.clock.now_ms(), self.config.cache_ttl_ms());
        match serde_json::to_string(entry.value) {
            Ok(json) => {
                self.storage.set(keys::USER_INFO_KEY, &json);
                self.storage
                    .set(keys::USER_INFO_EXPIRY_KEY, &entry.expires_at_ms.to_string());
            }
            Err(e) => {
                tracing::error!("failed to serialize user info for cache: {}", e);
                self.remove_entry();
            }
        }
    }

    fn remove_entry(&self) {
        self.storage.remove(keys::USER_INFO_KEY);
        self.storage.remove(keys::USER_INFO_EXPIRY_KEY);
    }
}
