//! 本地存储键
//!
//! 四个键在登出/注销时必须一起清除。

/// 登录令牌
pub const TOKEN_KEY: &str = "token";

/// 登录ID (展示用)
pub const LOGIN_ID_KEY: &str = "loginId";

/// 缓存的用户信息 JSON
pub const USER_INFO_KEY: &str = "cached_user_info";

/// 用户信息缓存过期时间戳 (毫秒)
pub const USER_INFO_EXPIRY_KEY: &str = "cached_user_info_expiry";
