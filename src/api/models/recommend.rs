use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 推荐/反馈请求里的用户标识
///
/// 注册用户用数字 id, 未登录场景用一次性访客 id。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum UserId {
    Registered(i64),
    Guest(String),
}

impl UserId {
    /// 生成一个新的访客标识
    pub fn guest() -> Self {
        UserId::Guest(Uuid::new_v4().to_string())
    }
}

/// 推荐请求
#[derive(Debug, Serialize)]
pub struct RecommendRequest {
    pub lat: f64,
    pub lon: f64,
    /// ISO-8601, 秒精度, 无时区后缀
    pub timestamp: String,
    pub user_id: UserId,
}

/// 推荐响应
#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationCandidate>,
}

/// 排序服务返回的一个候选菜单
#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationCandidate {
    pub menu_id: i64,
    pub menu_name: String,
}

/// 会话当前展示的推荐结果
#[derive(Debug, Clone, PartialEq)]
pub struct MenuRecommendation {
    pub menu_id: i64,
    pub menu_name: String,
}

impl From<RecommendationCandidate> for MenuRecommendation {
    fn from(candidate: RecommendationCandidate) -> Self {
        Self {
            menu_id: candidate.menu_id,
            menu_name: candidate.menu_name,
        }
    }
}

/// 跳过/满意反馈请求, 两个接口共用同一个请求体
#[derive(Debug, Serialize)]
pub struct FeedbackRequest {
    pub user_id: UserId,
    pub menu_id: i64,
    /// ISO-8601, 秒精度, 无时区后缀
    pub timestamp: String,
    pub lat: f64,
    pub lon: f64,
}
