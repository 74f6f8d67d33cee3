use reqwest::{Client, StatusCode};

use crate::api::models::user::{LoginRequest, SignupRequest, UpdateProfileRequest, UserProfile};
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 用户账号接口
///
/// 登录响应体是纯文本令牌, 其余接口用 Bearer 头携带令牌。
pub struct UserOperations;

impl UserOperations {
    /// 登录, 成功返回令牌
    pub async fn login(http: &Client, config: &Config, req: &LoginRequest) -> AppResult<String> {
        let url = format!("{}/user/login", config.backend_base_url);
        let response = http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::AuthFailed(format!("无法连接服务器: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                Err(AppError::AuthFailed("用户ID或密码不正确".to_string()))
            }
            status if !status.is_success() => {
                Err(AppError::AuthFailed(format!("服务器返回 {}", status)))
            }
            _ => response
                .text()
                .await
                .map_err(|e| AppError::AuthFailed(format!("读取令牌失败: {}", e))),
        }
    }

    /// 注册
    pub async fn signup(http: &Client, config: &Config, req: &SignupRequest) -> AppResult<()> {
        let url = format!("{}/user/signin", config.backend_base_url);
        let response = http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::AuthFailed(format!("无法连接服务器: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        // 失败时后端会在 body 里带一个 message 字段
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "注册失败".to_string());
        Err(AppError::AuthFailed(message))
    }

    /// 拉取当前用户信息
    pub async fn fetch_profile(
        http: &Client,
        config: &Config,
        token: &str,
    ) -> AppResult<UserProfile> {
        let url = format!("{}/user/info", config.backend_base_url);
        let response = http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::ProfileFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::ProfileFetchFailed(format!(
                "服务器返回 {}",
                response.status()
            )));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| AppError::ProfileFetchFailed(format!("响应体解析失败: {}", e)))
    }

    /// 更新用户信息
    pub async fn update_profile(
        http: &Client,
        config: &Config,
        token: &str,
        req: &UpdateProfileRequest,
    ) -> AppResult<()> {
        let url = format!("{}/user/update", config.backend_base_url);
        let response = http
            .put(&url)
            .bearer_auth(token)
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::AccountOperationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AccountOperationFailed(format!(
                "修改信息失败: 服务器返回 {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// 登出
    pub async fn logout(http: &Client, config: &Config, token: &str) -> AppResult<()> {
        let url = format!("{}/user/logout", config.backend_base_url);
        let response = http
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::AccountOperationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AccountOperationFailed(format!(
                "登出失败: 服务器返回 {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// 注销账号
    ///
    /// 注意路径挂在 /backend 根下, 不在 /backend/user 下。
    pub async fn delete_account(http: &Client, config: &Config, token: &str) -> AppResult<()> {
        let url = format!("{}/delete", config.backend_base_url);
        let response = http
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::AccountOperationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::AccountOperationFailed(format!(
                "注销失败: 服务器返回 {}",
                response.status()
            )));
        }
        Ok(())
    }
}
