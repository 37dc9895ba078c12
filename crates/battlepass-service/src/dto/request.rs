//! 请求参数定义

use serde::Deserialize;
use validator::Validate;

use crate::error::{Result, ServiceError};

/// `GET /api/reload/bptiers` 查询参数
///
/// `apikey` 由认证中间件处理，这里只保留字段以便完整解析查询串。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BpTiersQuery {
    pub apikey: Option<String>,
    #[validate(length(max = 64, message = "username too long"))]
    pub username: Option<String>,
    #[validate(length(max = 64, message = "reason too long"))]
    pub reason: Option<String>,
}

impl BpTiersQuery {
    /// 校验并取出 (username, reason)
    pub fn into_parts(self) -> Result<(String, String)> {
        self.validate()?;

        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| ServiceError::Validation("Missing username.".to_string()))?;
        let reason = self
            .reason
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ServiceError::Validation("Missing reason.".to_string()))?;

        Ok((username, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(username: Option<&str>, reason: Option<&str>) -> BpTiersQuery {
        BpTiersQuery {
            apikey: None,
            username: username.map(String::from),
            reason: reason.map(String::from),
        }
    }

    #[test]
    fn test_missing_fields() {
        let err = query(None, Some("daily")).into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Missing username.");

        let err = query(Some("   "), Some("daily")).into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Missing username.");

        let err = query(Some("player"), None).into_parts().unwrap_err();
        assert_eq!(err.to_string(), "Missing reason.");
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "x".repeat(65);
        let err = query(Some(&long), Some("daily")).into_parts().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_valid() {
        let (username, reason) = query(Some(" Player "), Some("daily")).into_parts().unwrap();
        assert_eq!(username, " Player ");
        assert_eq!(reason, "daily");
    }
}
