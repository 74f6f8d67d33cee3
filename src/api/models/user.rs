use serde::{Deserialize, Serialize};

/// 用户基本信息
///
/// 由后端持有, 客户端只保留一份带过期时间的只读副本。
/// 除 id 外的字段允许缺失, 兼容后端的部分响应。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    /// 过敏原, 后端用逗号拼接的字符串
    #[serde(default)]
    pub allergies: Option<String>,
    /// 偏好菜品列表
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl UserProfile {
    /// 拆出过敏原列表
    pub fn allergy_list(&self) -> Vec<String> {
        self.allergies
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 登录请求, 响应体是纯文本令牌
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub password: String,
}

/// 注册请求
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub password: String,
    pub age: String,
    pub gender: String,
    pub allergy: bool,
}

/// 更新用户信息请求
#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest {
    pub gender: String,
    pub age: String,
    pub allergies: String,
}
