use std::sync::Arc;

use reqwest::Client;

use crate::api::models::user::{LoginRequest, SignupRequest, UpdateProfileRequest, UserProfile};
use crate::api::operations::user::UserOperations;
use crate::cache::{UserInfoCache, keys};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::storage::KeyValueStorage;
use crate::utils::{validate_login_id, validate_password};

/// 账号生命周期管理
///
/// 登录/注册/修改/登出/注销的编排层: 负责本地身份键的写入清理,
/// 并在每次身份或资料变化后刷新用户信息缓存, 避免读到旧值。
pub struct AccountManager {
    http: Client,
    config: Config,
    storage: Arc<dyn KeyValueStorage>,
    user_cache: Arc<UserInfoCache>,
}

impl AccountManager {
    pub fn new(
        http: Client,
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        user_cache: Arc<UserInfoCache>,
    ) -> Self {
        Self {
            http,
            config,
            storage,
            user_cache,
        }
    }

    /// 登录并刷新缓存
    ///
    /// 登录表单只做非空校验。成功后令牌和登录ID落本地存储,
    /// 随后的缓存刷新失败会原样返回, 但令牌保持已写入状态。
    pub async fn login(&self, login_id: &str, password: &str) -> AppResult<UserProfile> {
        if login_id.is_empty() {
            return Err(AppError::ValidationFailed("请输入用户ID".to_string()));
        }
        if password.is_empty() {
            return Err(AppError::ValidationFailed("请输入密码".to_string()));
        }

        let req = LoginRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
        };
        let token = UserOperations::login(&self.http, &self.config, &req).await?;

        self.storage.set(keys::TOKEN_KEY, &token);
        self.storage.set(keys::LOGIN_ID_KEY, login_id);
        tracing::info!("logged in as {}", login_id);

        self.user_cache.refresh().await
    }

    /// 注册, 注册成功不自动登录
    pub async fn signup(&self, req: &SignupRequest) -> AppResult<()> {
        validate_login_id(&req.login_id)?;
        validate_password(&req.password)?;
        UserOperations::signup(&self.http, &self.config, req).await
    }

    /// 修改用户信息并刷新缓存
    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> AppResult<UserProfile> {
        let token = self.token().ok_or(AppError::Unauthenticated)?;
        UserOperations::update_profile(&self.http, &self.config, &token, req).await?;
        self.user_cache.refresh().await
    }

    /// 登出, 成功后清掉全部本地身份信息
    pub async fn logout(&self) -> AppResult<()> {
        let token = self.token().ok_or(AppError::Unauthenticated)?;
        UserOperations::logout(&self.http, &self.config, &token).await?;
        self.user_cache.invalidate();
        tracing::info!("logged out");
        Ok(())
    }

    /// 注销账号, 成功后清掉全部本地身份信息
    pub async fn delete_account(&self) -> AppResult<()> {
        let token = self.token().ok_or(AppError::Unauthenticated)?;
        UserOperations::delete_account(&self.http, &self.config, &token).await?;
        self.user_cache.invalidate();
        tracing::info!("account deleted");
        Ok(())
    }

    /// 展示用登录ID
    pub fn login_id(&self) -> Option<String> {
        self.storage.get(keys::LOGIN_ID_KEY)
    }

    fn token(&self) -> Option<String> {
        self.storage.get(keys::TOKEN_KEY)
    }
}
