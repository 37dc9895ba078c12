//! 通用策略：只记录清单

use crate::classifier::ItemCategory;
use crate::error::Result;
use crate::models::RewardLine;
use crate::strategy::context::GrantContext;
use crate::strategy::handler::{MergeOutcome, MergeStrategy};

/// 无法识别的奖励不写入任何容器
#[derive(Default)]
pub struct GenericStrategy;

impl MergeStrategy for GenericStrategy {
    fn category(&self) -> ItemCategory {
        ItemCategory::Generic
    }

    fn apply(&self, _ctx: &mut GrantContext, _line: &RewardLine) -> Result<MergeOutcome> {
        Ok(MergeOutcome::Recorded)
    }

    fn description(&self) -> &'static str {
        "Generic Strategy (manifest only)"
    }
}
