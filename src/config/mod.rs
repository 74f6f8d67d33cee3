use std::env;
use std::time::Duration;

/// 客户端配置, 全部来自环境变量, 缺省时退回线上地址
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub backend_base_url: String,
    pub api_base_url: String,
    pub cache_ttl_secs: u64,
}

const DEFAULT_BACKEND_BASE_URL: &str = "https://mealhub.duckdns.org/backend";
const DEFAULT_API_BASE_URL: &str = "https://mealhub.duckdns.org/api";
const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60; // 用户信息缓存 30 分钟

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let cache_ttl_secs = env::var("MEALHUB_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Config {
            backend_base_url: env::var("MEALHUB_BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_BASE_URL.to_string()),
            api_base_url: env::var("MEALHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            cache_ttl_secs,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_ttl_ms(&self) -> i64 {
        (self.cache_ttl_secs as i64) * 1000
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}
