use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};

/// 推荐/反馈接口要求的时间戳格式: ISO-8601 截断到秒, 不带时区标记
pub fn request_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// 校验登录ID: 4~12 位英文字母或数字
pub fn validate_login_id(login_id: &str) -> AppResult<()> {
    if login_id.is_empty() {
        return Err(AppError::ValidationFailed("请输入用户ID".to_string()));
    }
    let len = login_id.chars().count();
    if !(4..=12).contains(&len) || !login_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationFailed(
            "用户ID必须是4~12位的英文字母或数字".to_string(),
        ));
    }
    Ok(())
}

/// 校验密码: 8~16 位英文字母或数字, 不允许空白
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::ValidationFailed("请输入密码".to_string()));
    }
    if password.chars().any(char::is_whitespace) {
        return Err(AppError::ValidationFailed(
            "密码不能包含空白字符".to_string(),
        ));
    }
    let len = password.chars().count();
    if !(8..=16).contains(&len) || !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationFailed(
            "密码必须是8~16位的英文字母或数字".to_string(),
        ));
    }
    Ok(())
}
