use reqwest::Client;

use crate::api::models::recommend::{
    FeedbackRequest, MenuRecommendation, RecommendRequest, RecommendResponse,
};
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 推荐与反馈接口
///
/// 推荐失败(非 2xx / 解析失败 / 空候选)由会话层用备选菜单兜底;
/// 反馈接口是尽力而为, 调用方只记录失败。
pub struct RecommendOperations;

impl RecommendOperations {
    /// 请求一次菜单推荐, 返回第一个候选
    pub async fn request_recommendation(
        http: &Client,
        config: &Config,
        req: &RecommendRequest,
    ) -> AppResult<MenuRecommendation> {
        let url = format!("{}/recommend/", config.api_base_url);
        let response = http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::RecommendationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::RecommendationFailed(format!(
                "服务器返回 {}",
                response.status()
            )));
        }

        let body = response
            .json::<RecommendResponse>()
            .await
            .map_err(|e| AppError::RecommendationFailed(format!("响应体解析失败: {}", e)))?;

        body.recommendations
            .into_iter()
            .next()
            .map(MenuRecommendation::from)
            .ok_or_else(|| AppError::RecommendationFailed("候选列表为空".to_string()))
    }

    /// 跳过反馈
    pub async fn submit_skip_feedback(
        http: &Client,
        config: &Config,
        req: &FeedbackRequest,
    ) -> AppResult<()> {
        Self::submit_feedback(http, config, "skip", req).await
    }

    /// 满意反馈, 进入地图视图时上报
    pub async fn submit_satisfaction_feedback(
        http: &Client,
        config: &Config,
        req: &FeedbackRequest,
    ) -> AppResult<()> {
        Self::submit_feedback(http, config, "satisfy", req).await
    }

    async fn submit_feedback(
        http: &Client,
        config: &Config,
        kind: &str,
        req: &FeedbackRequest,
    ) -> AppResult<()> {
        let url = format!("{}/feedback/{}", config.api_base_url, kind);
        let response = http
            .post(&url)
            .json(req)
            .send()
            .await
            .map_err(|e| AppError::FeedbackSubmissionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::FeedbackSubmissionFailed(format!(
                "服务器返回 {}",
                response.status()
            )));
        }
        Ok(())
    }
}
