use serde::Serialize;
use tier_reward::{GrantStats, GrantSummary};

/// 一次按原因发放的结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierGrantReceipt {
    /// 账号中保存的原始用户名
    pub username: String,
    pub reason: String,
    pub tiers_added: i64,
    pub summary: GrantSummary,
    pub stats: GrantStats,
}
