//! 赛季奖励目录
//!
//! 目录以赛季文件的形式存储：`freeRewards` 与 `paidRewards` 两个并列数组，
//! 数组下标即等级，每个元素是「物品标识 -> 数量」的对象。
//! 对象中 key 的顺序就是发放顺序，因此这里不使用 HashMap。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{GrantError, Result};

/// 单条奖励
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardLine {
    pub item_id: String,
    pub quantity: i64,
}

impl RewardLine {
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// 有序奖励集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardSet {
    lines: IndexMap<String, i64>,
}

impl RewardSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条奖励；同一标识重复出现时覆盖数量并保留原位置
    pub fn push(&mut self, item_id: impl Into<String>, quantity: i64) {
        self.lines.insert(item_id.into(), quantity);
    }

    pub fn with(mut self, item_id: impl Into<String>, quantity: i64) -> Self {
        self.push(item_id, quantity);
        self
    }

    /// 按目录顺序遍历奖励
    pub fn lines(&self) -> impl Iterator<Item = RewardLine> + '_ {
        self.lines
            .iter()
            .map(|(item_id, quantity)| RewardLine::new(item_id.as_str(), *quantity))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for RewardSet {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut set = RewardSet::new();
        for (item_id, quantity) in iter {
            set.push(item_id, quantity);
        }
        set
    }
}

/// 单个等级的免费/付费奖励
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierRewards {
    pub free_rewards: RewardSet,
    pub paid_rewards: RewardSet,
}

impl TierRewards {
    pub fn new(free_rewards: RewardSet, paid_rewards: RewardSet) -> Self {
        Self {
            free_rewards,
            paid_rewards,
        }
    }
}

/// 赛季文件的存储格式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeasonTracks {
    #[serde(default)]
    free_rewards: Vec<RewardSet>,
    #[serde(default)]
    paid_rewards: Vec<RewardSet>,
}

/// 赛季奖励目录
///
/// 按等级索引，等级从 1 开始，下标 0 不参与发放。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SeasonTracks", into = "SeasonTracks")]
pub struct RewardCatalog {
    tiers: Vec<TierRewards>,
}

impl From<SeasonTracks> for RewardCatalog {
    fn from(tracks: SeasonTracks) -> Self {
        Self::from_tracks(tracks.free_rewards, tracks.paid_rewards)
    }
}

impl From<RewardCatalog> for SeasonTracks {
    fn from(catalog: RewardCatalog) -> Self {
        let (free_rewards, paid_rewards) = catalog
            .tiers
            .into_iter()
            .map(|tier| (tier.free_rewards, tier.paid_rewards))
            .unzip();
        Self {
            free_rewards,
            paid_rewards,
        }
    }
}

impl RewardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由两条并列轨道构造，长度不一致时较短的一侧补空集合
    pub fn from_tracks(free: Vec<RewardSet>, paid: Vec<RewardSet>) -> Self {
        let len = free.len().max(paid.len());
        let mut free = free.into_iter();
        let mut paid = paid.into_iter();
        let tiers = (0..len)
            .map(|_| {
                TierRewards::new(
                    free.next().unwrap_or_default(),
                    paid.next().unwrap_or_default(),
                )
            })
            .collect();
        Self { tiers }
    }

    /// 解析赛季文件内容
    pub fn from_json_str(season: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| GrantError::catalog_unavailable(season, e))
    }

    /// 设置某个等级的奖励（`tier` 从 1 开始）
    pub fn with_tier(mut self, tier: usize, rewards: TierRewards) -> Self {
        if self.tiers.len() <= tier {
            self.tiers.resize_with(tier + 1, TierRewards::default);
        }
        self.tiers[tier] = rewards;
        self
    }

    /// 目录中定义的最高等级
    pub fn highest_tier(&self) -> i64 {
        self.tiers.len().saturating_sub(1) as i64
    }

    /// 等级奖励，等级 0 及越界均返回 None
    pub fn tier(&self, tier: i64) -> Option<&TierRewards> {
        if tier < 1 {
            return None;
        }
        usize::try_from(tier).ok().and_then(|i| self.tiers.get(i))
    }
}
