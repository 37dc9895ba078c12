//! 通行证服务错误类型定义
//!
//! 对外响应体沿用 `{code, error}` 结构，`code` 为 HTTP 状态码字符串，
//! 另附 `errorCode` 供调用方做条件分支。

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tier_reward::GrantError;

/// 通行证服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    // 认证错误
    #[error("Invalid or missing API key.")]
    Unauthorized,

    // 验证错误
    #[error("{0}")]
    Validation(String),
    #[error("Battle Pass is disabled in the server config.")]
    BattlePassDisabled,

    // 资源不存在
    #[error("User not found.")]
    PlayerNotFound,
    #[error("Profiles document not found: {0}")]
    ProfilesNotFound(String),

    // 限流
    #[error("Reason already used recently, retry in {retry_after_secs}s.")]
    CooldownActive { retry_after_secs: u64 },

    // 发放错误
    #[error("Battle Pass configuration not found for this season.")]
    Catalog { season: String, reason: String },
    #[error("发放失败: {0}")]
    Grant(GrantError),

    // 系统错误
    #[error("存储错误: {0}")]
    Storage(String),
}

impl ServiceError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BattlePassDisabled => StatusCode::BAD_REQUEST,
            Self::PlayerNotFound | Self::ProfilesNotFound(_) => StatusCode::NOT_FOUND,
            Self::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Grant(GrantError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            Self::Grant(GrantError::IncompleteSnapshot(_)) => StatusCode::NOT_FOUND,
            Self::Grant(GrantError::CatalogUnavailable { .. })
            | Self::Catalog { .. }
            | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BattlePassDisabled => "BATTLEPASS_DISABLED",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::ProfilesNotFound(_) => "PROFILES_NOT_FOUND",
            Self::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            Self::Catalog { .. } => "CATALOG_UNAVAILABLE",
            Self::Grant(e) => e.error_code(),
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// 用于指标标签的结果状态
    pub fn metric_status(&self) -> &'static str {
        match self {
            Self::CooldownActive { .. } => "cooldown",
            Self::Catalog { .. } => "catalog_unavailable",
            Self::Grant(GrantError::InvalidRequest(_)) => "invalid_request",
            Self::Grant(_) => "incomplete_snapshot",
            Self::PlayerNotFound | Self::ProfilesNotFound(_) => "not_found",
            _ => "error",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Catalog { season, reason } => {
                tracing::error!(season = %season, reason = %reason, "赛季奖励目录加载失败");
                self.to_string()
            }
            Self::Storage(e) => {
                tracing::error!(error = %e, "档案存储操作失败");
                "Server error. Check logs for details.".to_string()
            }
            other => other.to_string(),
        };

        let mut response = (
            status,
            axum::Json(json!({
                "code": status.as_u16().to_string(),
                "errorCode": self.error_code(),
                "error": message,
            })),
        )
            .into_response();

        if let Self::CooldownActive { retry_after_secs } = self {
            response.headers_mut().insert(
                axum::http::header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs),
            );
        }

        response
    }
}

/// 目录不可用单独归类，其余引擎错误原样包装
impl From<GrantError> for ServiceError {
    fn from(err: GrantError) -> Self {
        match err {
            GrantError::CatalogUnavailable { season, reason } => Self::Catalog { season, reason },
            other => Self::Grant(other),
        }
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    /// 所有错误变体及其期望的 (StatusCode, error_code)
    fn all_error_variants() -> Vec<(ServiceError, StatusCode, &'static str)> {
        vec![
            (ServiceError::Unauthorized, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (ServiceError::Validation("Missing username.".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ServiceError::BattlePassDisabled, StatusCode::BAD_REQUEST, "BATTLEPASS_DISABLED"),
            (ServiceError::PlayerNotFound, StatusCode::NOT_FOUND, "PLAYER_NOT_FOUND"),
            (ServiceError::ProfilesNotFound("athena".into()), StatusCode::NOT_FOUND, "PROFILES_NOT_FOUND"),
            (ServiceError::CooldownActive { retry_after_secs: 30 }, StatusCode::TOO_MANY_REQUESTS, "COOLDOWN_ACTIVE"),
            (
                ServiceError::Catalog { season: "Season1".into(), reason: "io".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
                "CATALOG_UNAVAILABLE",
            ),
            (
                ServiceError::Grant(GrantError::InvalidRequest("tiers".into())),
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
            ),
            (
                ServiceError::Grant(GrantError::IncompleteSnapshot("wallet".into())),
                StatusCode::NOT_FOUND,
                "INCOMPLETE_SNAPSHOT",
            ),
            (ServiceError::Storage("down".into()), StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        ]
    }

    #[test]
    fn test_all_variants_status_and_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            assert_eq!(error.status_code(), expected_status, "状态码不匹配: {expected_code}");
            assert_eq!(error.error_code(), expected_code);
        }
    }

    #[test]
    fn test_catalog_unavailable_converted() {
        let err: ServiceError = GrantError::catalog_unavailable("Season3", "missing").into();
        assert!(matches!(err, ServiceError::Catalog { ref season, .. } if season == "Season3"));

        let err: ServiceError = GrantError::InvalidRequest("x".into()).into();
        assert!(matches!(err, ServiceError::Grant(_)));
    }

    #[test]
    fn test_cooldown_sets_retry_after() {
        let response = ServiceError::CooldownActive { retry_after_secs: 12 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(axum::http::header::RETRY_AFTER).unwrap(),
            "12"
        );
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = ServiceError::Storage("connection string leaked".into());
        assert!(err.to_string().contains("leaked"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
