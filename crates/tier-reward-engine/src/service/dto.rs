//! 发放请求与结果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{GrantStats, GrantSummary, InventorySnapshot, LootManifest};

/// 发放请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRequest {
    /// 要增加的等级数，必须为正数
    pub tiers_to_add: i64,
    /// 写入修订戳的操作时间
    pub granted_at: DateTime<Utc>,
}

impl GrantRequest {
    pub fn new(tiers_to_add: i64) -> Self {
        Self::at(tiers_to_add, Utc::now())
    }

    /// 指定操作时间，便于得到可复现的结果
    pub fn at(tiers_to_add: i64, granted_at: DateTime<Utc>) -> Self {
        Self {
            tiers_to_add,
            granted_at,
        }
    }
}

/// 发放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantPhase {
    Idle,
    Validating,
    Granting,
    Finalizing,
    Done,
    Failed,
}

impl GrantPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Granting => "granting",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// 发放结果
#[derive(Debug, Clone, PartialEq)]
pub struct GrantOutcome {
    /// 更新后的快照，由调用方负责持久化
    pub snapshot: InventorySnapshot,
    pub manifest: LootManifest,
    pub summary: GrantSummary,
    pub stats: GrantStats,
}

impl GrantOutcome {
    pub fn starting_tier(&self) -> i64 {
        self.summary.book_level_before
    }

    pub fn ending_tier(&self) -> i64 {
        self.summary.book_level_after
    }
}
