//! 响应体定义

use serde::Serialize;

use crate::service::TierGrantReceipt;

/// 等级发放成功响应
///
/// 字段名与既有客户端保持一致，混用 camelCase 与 snake_case。
#[derive(Debug, Clone, Serialize)]
pub struct BpTiersResponse {
    pub message: String,
    pub username: String,
    pub reason: String,
    #[serde(rename = "tiersAdded")]
    pub tiers_added: i64,
    pub book_level_before: i64,
    pub book_level_after: i64,
    #[serde(rename = "lootListCount")]
    pub loot_list_count: usize,
}

impl From<TierGrantReceipt> for BpTiersResponse {
    fn from(receipt: TierGrantReceipt) -> Self {
        Self {
            message: "Battle Pass tiers (and cosmetics) successfully added.".to_string(),
            username: receipt.username,
            reason: receipt.reason,
            tiers_added: receipt.tiers_added,
            book_level_before: receipt.summary.book_level_before,
            book_level_after: receipt.summary.book_level_after,
            loot_list_count: receipt.summary.loot_list_count,
        }
    }
}

/// 存活探针响应
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}
