//! 外观物品策略

use tracing::debug;

use crate::classifier::ItemCategory;
use crate::error::Result;
use crate::models::{CosmeticAttributes, ItemAttributes, ItemRecord, RewardLine};
use crate::strategy::context::GrantContext;
use crate::strategy::handler::{MergeOutcome, MergeStrategy};

/// 外观策略
///
/// 写入进度容器。已持有时只重置 `item_seen`，数量和其他属性不变；
/// 未持有时按默认外观属性新建条目，数量取奖励数量。
#[derive(Default)]
pub struct CosmeticStrategy;

impl MergeStrategy for CosmeticStrategy {
    fn category(&self) -> ItemCategory {
        ItemCategory::Cosmetic
    }

    fn apply(&self, ctx: &mut GrantContext, line: &RewardLine) -> Result<MergeOutcome> {
        let existing = ctx.progression.items.keys_with_template(&line.item_id);

        if !existing.is_empty() {
            for key in &existing {
                if let Some(item) = ctx.progression.items.get_mut(key) {
                    item.attributes.mark_unseen();
                }
            }
            debug!(item_id = %line.item_id, matched = existing.len(), "外观已持有，重新标记为新");
            return Ok(MergeOutcome::Resurfaced { item_keys: existing });
        }

        let item_key = GrantContext::new_item_id();
        ctx.progression.items.insert(
            item_key.clone(),
            ItemRecord::new(
                line.item_id.clone(),
                ItemAttributes::Cosmetic(CosmeticAttributes::default()),
                line.quantity,
            ),
        );
        debug!(item_id = %line.item_id, item_key = %item_key, quantity = line.quantity, "新增外观");

        Ok(MergeOutcome::Created { item_key })
    }

    fn description(&self) -> &'static str {
        "Athena Cosmetic Strategy"
    }
}
