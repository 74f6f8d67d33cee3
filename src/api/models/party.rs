use serde::Serialize;

use crate::error::{AppError, AppResult};

/// 邀请码, 最长 8 位, 统一转大写
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyCode(String);

impl PartyCode {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(AppError::ValidationFailed("请输入邀请码".to_string()));
        }
        if normalized.chars().count() > 8 {
            return Err(AppError::ValidationFailed(
                "邀请码最长 8 个字符".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 加入派对请求
#[derive(Debug, Serialize)]
pub struct JoinPartyRequest {
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_trimmed_and_uppercased() {
        let code = PartyCode::parse("  ab12cd  ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn empty_code_rejected() {
        assert!(PartyCode::parse("   ").is_err());
    }

    #[test]
    fn overlong_code_rejected() {
        assert!(PartyCode::parse("ABCDEFGHI").is_err());
        assert!(PartyCode::parse("ABCDEFGH").is_ok());
    }
}
