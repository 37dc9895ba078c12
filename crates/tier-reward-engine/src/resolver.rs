//! 等级奖励解析
//!
//! 越界等级（含等级 0）返回空集合而不是报错，
//! 这样通行证等级可以超出目录定义的范围继续增长。

use std::sync::LazyLock;

use crate::models::{RewardCatalog, RewardSet};

static EMPTY_SET: LazyLock<RewardSet> = LazyLock::new(RewardSet::new);

/// 某个等级解析出的免费/付费奖励
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTier<'a> {
    pub tier: i64,
    pub free: &'a RewardSet,
    pub paid: &'a RewardSet,
}

impl ResolvedTier<'_> {
    pub fn is_empty(&self) -> bool {
        self.free.is_empty() && self.paid.is_empty()
    }
}

/// 解析指定等级的奖励
pub fn resolve(catalog: &RewardCatalog, tier: i64) -> ResolvedTier<'_> {
    match catalog.tier(tier) {
        Some(rewards) => ResolvedTier {
            tier,
            free: &rewards.free_rewards,
            paid: &rewards.paid_rewards,
        },
        None => ResolvedTier {
            tier,
            free: &*EMPTY_SET,
            paid: &*EMPTY_SET,
        },
    }
}

/// 需要实际遍历的等级上界（不含）
///
/// 目录之外的等级不产生任何奖励，循环只需走到目录末尾。
pub fn effective_upper_bound(catalog: &RewardCatalog, ending_tier: i64) -> i64 {
    ending_tier.min(catalog.highest_tier().saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TierRewards;

    fn catalog() -> RewardCatalog {
        RewardCatalog::new()
            .with_tier(
                1,
                TierRewards::new(
                    RewardSet::new().with("Token:AthenaSeasonXpBoost", 5),
                    RewardSet::new().with("Currency:MtxGiveaway", 100),
                ),
            )
            .with_tier(
                2,
                TierRewards::new(RewardSet::new().with("Athena:Skin1", 1), RewardSet::new()),
            )
    }

    #[test]
    fn test_resolve_in_range() {
        let catalog = catalog();
        let tier = resolve(&catalog, 1);
        assert_eq!(tier.tier, 1);
        assert_eq!(tier.free.len(), 1);
        assert_eq!(tier.paid.len(), 1);
        assert!(!tier.is_empty());
    }

    #[test]
    fn test_resolve_out_of_range_is_empty() {
        let catalog = catalog();
        assert!(resolve(&catalog, 0).is_empty());
        assert!(resolve(&catalog, 3).is_empty());
        assert!(resolve(&catalog, i64::MAX).is_empty());
    }

    #[test]
    fn test_effective_upper_bound() {
        let catalog = catalog();
        assert_eq!(effective_upper_bound(&catalog, 2), 2);
        assert_eq!(effective_upper_bound(&catalog, 100), 3);
        assert_eq!(effective_upper_bound(&RewardCatalog::new(), 10), 1);
    }
}
