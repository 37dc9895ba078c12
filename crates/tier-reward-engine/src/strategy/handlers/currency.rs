//! 货币策略
//!
//! 单钱包假设：只累加主容器中第一个货币条目，并把同样的数量
//! 同步到次容器中同一实例 ID 的条目上。

use tracing::{debug, warn};

use crate::classifier::{ItemCategory, is_currency_template};
use crate::error::{GrantError, Result};
use crate::models::RewardLine;
use crate::strategy::context::GrantContext;
use crate::strategy::handler::{MergeOutcome, MergeStrategy};

/// 货币策略
#[derive(Default)]
pub struct CurrencyStrategy;

impl MergeStrategy for CurrencyStrategy {
    fn category(&self) -> ItemCategory {
        ItemCategory::Currency
    }

    fn apply(&self, ctx: &mut GrantContext, line: &RewardLine) -> Result<MergeOutcome> {
        let wallet_key = ctx
            .primary
            .items
            .iter()
            .find(|(_, item)| is_currency_template(&item.template_id))
            .map(|(key, _)| key.to_string());

        let Some(wallet_key) = wallet_key else {
            // 主容器没有钱包条目时奖励不入账，保持原有行为
            warn!(item_id = %line.item_id, quantity = line.quantity, "主容器缺少货币条目，货币奖励未入账");
            return Ok(MergeOutcome::Dropped {
                reason: "no currency item in primary container",
            });
        };

        // 先确认镜像条目存在，再修改任何数量
        if !ctx.secondary.items.contains_key(&wallet_key) {
            return Err(GrantError::IncompleteSnapshot(format!(
                "次容器缺少货币条目: {}",
                wallet_key
            )));
        }

        let mut quantity_after = 0;
        if let Some(wallet) = ctx.primary.items.get_mut(&wallet_key) {
            wallet.quantity = wallet.quantity.saturating_add(line.quantity);
            quantity_after = wallet.quantity;
        }
        if let Some(mirror) = ctx.secondary.items.get_mut(&wallet_key) {
            mirror.quantity = mirror.quantity.saturating_add(line.quantity);
        }

        debug!(
            wallet_key = %wallet_key,
            added = line.quantity,
            quantity_after,
            "货币入账"
        );

        Ok(MergeOutcome::QuantityAdded {
            item_key: wallet_key,
            added: line.quantity,
            quantity_after,
        })
    }

    fn description(&self) -> &'static str {
        "Currency Strategy (single wallet)"
    }
}
