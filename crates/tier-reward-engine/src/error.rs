//! 等级奖励发放错误类型
//!
//! 引擎本身是纯计算逻辑，所有错误都在修改快照之前同步返回给调用方，
//! 引擎内部不做任何重试。

use thiserror::Error;

/// 发放引擎错误类型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrantError {
    /// 请求本身不合法（等级数非正、等级溢出等）
    #[error("请求参数无效: {0}")]
    InvalidRequest(String),

    /// 赛季奖励目录无法解析（由目录加载方产生，原样向上传递）
    #[error("赛季奖励目录不可用: season={season}, reason={reason}")]
    CatalogUnavailable { season: String, reason: String },

    /// 库存快照缺少必需的容器或条目
    #[error("库存快照不完整: {0}")]
    IncompleteSnapshot(String),
}

/// 发放引擎 Result 类型别名
pub type Result<T> = std::result::Result<T, GrantError>;

impl GrantError {
    /// 构造目录不可用错误
    pub fn catalog_unavailable(season: impl Into<String>, reason: impl ToString) -> Self {
        Self::CatalogUnavailable {
            season: season.into(),
            reason: reason.to_string(),
        }
    }

    /// 引擎错误均不可重试：输入不变时结果也不会变
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::CatalogUnavailable { .. } => "CATALOG_UNAVAILABLE",
            Self::IncompleteSnapshot(_) => "INCOMPLETE_SNAPSHOT",
        }
    }
}
