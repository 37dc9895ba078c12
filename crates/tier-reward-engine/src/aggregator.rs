//! 进度汇总器
//!
//! 按处理顺序记录发放清单，并累计派生计数（经验加成、货币、条目数）。
//! 每条被处理的奖励都会写入清单，无论策略是否修改了容器。

use tracing::debug;

use crate::classifier::ItemCategory;
use crate::models::{GrantStats, LootManifest, LootManifestEntry, RewardLine};
use crate::strategy::{BoostCounter, MergeOutcome};

/// 奖励轨道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardTrack {
    Free,
    Paid,
}

impl RewardTrack {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

/// 进度汇总器
#[derive(Debug, Default)]
pub struct ProgressionAggregator {
    manifest: LootManifest,
    stats: GrantStats,
}

impl ProgressionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条已处理的奖励
    pub fn record(
        &mut self,
        tier: i64,
        track: RewardTrack,
        category: ItemCategory,
        line: &RewardLine,
        outcome: &MergeOutcome,
    ) {
        match outcome {
            MergeOutcome::CounterIncremented { counter, added, .. } => match counter {
                BoostCounter::SeasonMatch => {
                    self.stats.season_match_boost_added =
                        self.stats.season_match_boost_added.saturating_add(*added);
                }
                BoostCounter::SeasonFriendMatch => {
                    self.stats.season_friend_match_boost_added = self
                        .stats
                        .season_friend_match_boost_added
                        .saturating_add(*added);
                }
            },
            MergeOutcome::QuantityAdded { added, .. } => {
                self.stats.currency_added = self.stats.currency_added.saturating_add(*added);
            }
            MergeOutcome::Created { .. } => self.stats.items_created += 1,
            MergeOutcome::Resurfaced { .. } => self.stats.items_resurfaced += 1,
            MergeOutcome::Dropped { .. } => self.stats.grants_dropped += 1,
            MergeOutcome::Recorded => {}
        }

        debug!(
            tier,
            track = track.as_str(),
            category = category.as_str(),
            item_id = %line.item_id,
            quantity = line.quantity,
            "记录发放清单"
        );

        self.manifest
            .push(LootManifestEntry::new(line.item_id.clone(), line.quantity));
    }

    pub fn manifest(&self) -> &LootManifest {
        &self.manifest
    }

    pub fn stats(&self) -> &GrantStats {
        &self.stats
    }

    pub fn into_parts(self) -> (LootManifest, GrantStats) {
        (self.manifest, self.stats)
    }
}
