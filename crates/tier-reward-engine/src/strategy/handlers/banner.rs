//! 主页旗帜策略

use tracing::debug;

use crate::classifier::ItemCategory;
use crate::error::Result;
use crate::models::{BannerAttributes, ItemAttributes, ItemRecord, RewardLine};
use crate::strategy::context::GrantContext;
use crate::strategy::handler::{MergeOutcome, MergeStrategy};

/// 旗帜策略
///
/// 写入主容器。已持有时只重置 `item_seen`，数量不变；
/// 未持有时新建一条数量为 1 的条目（旗帜不可叠加）。
#[derive(Default)]
pub struct BannerStrategy;

impl MergeStrategy for BannerStrategy {
    fn category(&self) -> ItemCategory {
        ItemCategory::Banner
    }

    fn apply(&self, ctx: &mut GrantContext, line: &RewardLine) -> Result<MergeOutcome> {
        let existing = ctx.primary.items.keys_with_template(&line.item_id);

        if !existing.is_empty() {
            for key in &existing {
                if let Some(item) = ctx.primary.items.get_mut(key) {
                    item.attributes.mark_unseen();
                }
            }
            debug!(item_id = %line.item_id, matched = existing.len(), "旗帜已持有，重新标记为新");
            return Ok(MergeOutcome::Resurfaced { item_keys: existing });
        }

        let item_key = GrantContext::new_item_id();
        ctx.primary.items.insert(
            item_key.clone(),
            ItemRecord::new(
                line.item_id.clone(),
                ItemAttributes::Banner(BannerAttributes::unseen()),
                1,
            ),
        );
        debug!(item_id = %line.item_id, item_key = %item_key, "新增旗帜");

        Ok(MergeOutcome::Created { item_key })
    }

    fn description(&self) -> &'static str {
        "Homebase Banner Strategy"
    }
}
