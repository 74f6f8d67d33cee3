use std::sync::Arc;

use config::Config;
use storage::{KeyValueStorage, MemoryStorage};

pub mod account;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod session;
pub mod storage;
pub mod utils;

use account::AccountManager;
use cache::UserInfoCache;
use geo::LocationProvider;
use session::Session;

/// 应用共享上下文
///
/// HTTP 客户端开启 cookie 存储, 派对接口依赖服务端会话 cookie。
#[derive(Clone)]
pub struct AppContext {
    pub http: reqwest::Client,
    pub config: Config,
    pub storage: Arc<dyn KeyValueStorage>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            config,
            storage,
        }
    }

    pub fn user_cache(&self) -> Arc<UserInfoCache> {
        Arc::new(UserInfoCache::new(
            self.http.clone(),
            self.config.clone(),
            self.storage.clone(),
        ))
    }

    pub fn account(&self, user_cache: Arc<UserInfoCache>) -> AccountManager {
        AccountManager::new(
            self.http.clone(),
            self.config.clone(),
            self.storage.clone(),
            user_cache,
        )
    }

    pub fn session(
        &self,
        user_cache: Arc<UserInfoCache>,
        location: Arc<dyn LocationProvider>,
    ) -> Session {
        Session::new(self.http.clone(), self.config.clone(), user_cache, location)
    }
}
