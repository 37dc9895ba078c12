//! 合并策略 Trait 定义
//!
//! 每个奖励类别对应一个策略，负责把一条奖励合并进工作集中正确的容器。

use crate::classifier::ItemCategory;
use crate::error::Result;
use crate::models::RewardLine;

use super::context::GrantContext;

/// 经验加成计数器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostCounter {
    SeasonMatch,
    SeasonFriendMatch,
}

/// 单条奖励的合并结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 经验加成计数器增加
    CounterIncremented {
        counter: BoostCounter,
        added: i64,
        total: i64,
    },
    /// 已有条目数量增加（货币）
    QuantityAdded {
        item_key: String,
        added: i64,
        quantity_after: i64,
    },
    /// 已有条目重新标记为未查看
    Resurfaced { item_keys: Vec<String> },
    /// 新建条目
    Created { item_key: String },
    /// 奖励未入账（找不到目标条目）
    Dropped { reason: &'static str },
    /// 仅记录清单
    Recorded,
}

/// 合并策略 Trait
///
/// 对同一物品重复发放时：已存在的条目不会被重复创建，
/// 但数量类奖励会累加。
///
/// # 示例
///
/// ```ignore
/// struct NoopStrategy;
///
/// impl MergeStrategy for NoopStrategy {
///     fn category(&self) -> ItemCategory {
///         ItemCategory::Generic
///     }
///
///     fn apply(&self, _ctx: &mut GrantContext, _line: &RewardLine) -> Result<MergeOutcome> {
///         Ok(MergeOutcome::Recorded)
///     }
/// }
/// ```
pub trait MergeStrategy: Send + Sync {
    /// 返回此策略处理的类别，用于注册表索引
    fn category(&self) -> ItemCategory;

    /// 合并一条奖励
    ///
    /// 返回 `Err` 时编排器会放弃整个工作集。
    fn apply(&self, ctx: &mut GrantContext, line: &RewardLine) -> Result<MergeOutcome>;

    /// 策略描述（用于日志）
    fn description(&self) -> &'static str {
        "Generic Merge Strategy"
    }
}
