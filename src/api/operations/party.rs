use reqwest::Client;

use crate::api::models::party::{JoinPartyRequest, PartyCode};
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 派对接口, 基于服务端会话 cookie, 不带 Bearer 头
pub struct PartyOperations;

impl PartyOperations {
    /// 创建派对, 响应体是纯文本的邀请码/确认信息
    pub async fn create_party(http: &Client, config: &Config) -> AppResult<String> {
        let url = format!("{}/party/create", config.backend_base_url);
        let response = http
            .post(&url)
            .send()
            .await
            .map_err(|e| AppError::PartyOperationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::PartyOperationFailed(format!(
                "服务器返回 {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::PartyOperationFailed(e.to_string()))
    }

    /// 用邀请码加入派对
    pub async fn join_party(http: &Client, config: &Config, code: &PartyCode) -> AppResult<()> {
        let url = format!("{}/party/join", config.backend_base_url);
        let response = http
            .post(&url)
            .json(&JoinPartyRequest {
                code: code.as_str().to_string(),
            })
            .send()
            .await
            .map_err(|e| AppError::PartyOperationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::PartyOperationFailed(format!(
                "服务器返回 {}",
                response.status()
            )));
        }
        Ok(())
    }
}
