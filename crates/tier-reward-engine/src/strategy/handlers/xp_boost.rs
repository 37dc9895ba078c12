//! 经验加成策略

use tracing::debug;

use crate::classifier::ItemCategory;
use crate::error::Result;
use crate::models::RewardLine;
use crate::strategy::context::GrantContext;
use crate::strategy::handler::{BoostCounter, MergeOutcome, MergeStrategy};

/// 经验加成策略
///
/// 直接累加通行证属性上的计数器，不创建任何物品条目。
pub struct XpBoostStrategy {
    counter: BoostCounter,
}

impl XpBoostStrategy {
    /// 对局经验加成
    pub fn season() -> Self {
        Self {
            counter: BoostCounter::SeasonMatch,
        }
    }

    /// 好友对局经验加成
    pub fn friend() -> Self {
        Self {
            counter: BoostCounter::SeasonFriendMatch,
        }
    }
}

impl MergeStrategy for XpBoostStrategy {
    fn category(&self) -> ItemCategory {
        match self.counter {
            BoostCounter::SeasonMatch => ItemCategory::SeasonXpBoost,
            BoostCounter::SeasonFriendMatch => ItemCategory::SeasonFriendXpBoost,
        }
    }

    fn apply(&self, ctx: &mut GrantContext, line: &RewardLine) -> Result<MergeOutcome> {
        let slot = match self.counter {
            BoostCounter::SeasonMatch => &mut ctx.attributes.season_match_boost,
            BoostCounter::SeasonFriendMatch => &mut ctx.attributes.season_friend_match_boost,
        };
        *slot = slot.saturating_add(line.quantity);
        let total = *slot;

        debug!(counter = ?self.counter, added = line.quantity, total, "累加经验加成");

        Ok(MergeOutcome::CounterIncremented {
            counter: self.counter,
            added: line.quantity,
            total,
        })
    }

    fn description(&self) -> &'static str {
        match self.counter {
            BoostCounter::SeasonMatch => "Season XP Boost Strategy",
            BoostCounter::SeasonFriendMatch => "Season Friend XP Boost Strategy",
        }
    }
}
