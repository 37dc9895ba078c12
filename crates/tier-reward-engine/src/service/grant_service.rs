//! 等级奖励发放编排器
//!
//! 负责一次发放操作的完整流程：
//! - 参数校验与进度属性归一化
//! - 按等级解析免费/付费奖励
//! - 分类后路由到对应合并策略
//! - 汇总发放清单并写入礼盒回执
//! - 统一推进三个容器的修订号
//!
//! ## 发放流程
//!
//! 1. Validating -> 2. Granting（逐等级、先免费后付费）-> 3. Finalizing -> 4. Done
//!
//! 校验阶段失败直接返回错误；所有修改都发生在工作集上，
//! 任意阶段失败时调用方的快照保持不变。

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::aggregator::{ProgressionAggregator, RewardTrack};
use crate::classifier::classify;
use crate::error::{GrantError, Result};
use crate::models::{
    GiftBoxAttributes, GrantSummary, InventorySnapshot, ItemAttributes, ItemRecord, RewardCatalog,
    RewardSet,
};
use crate::resolver::{effective_upper_bound, resolve};
use crate::strategy::{GrantContext, MergeOutcome, StrategyRegistry};

use super::dto::{GrantOutcome, GrantPhase, GrantRequest};

/// 礼盒回执的模板 ID
pub const GRANT_RECEIPT_TEMPLATE: &str = "GiftBox:gb_battlepass";

/// 等级奖励发放服务
///
/// 纯同步计算，不做任何 I/O。同一玩家的并发发放需要调用方串行化。
pub struct TierGrantService {
    registry: Arc<StrategyRegistry>,
}

impl TierGrantService {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    /// 使用默认策略集合创建
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(StrategyRegistry::with_defaults()))
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// 执行一次发放
    ///
    /// 成功时返回更新后的快照副本、发放清单与汇总；失败时不产生任何修改。
    #[instrument(
        skip(self, snapshot, catalog, request),
        fields(tiers_to_add = request.tiers_to_add, highest_tier = catalog.highest_tier())
    )]
    pub fn grant(
        &self,
        snapshot: &InventorySnapshot,
        catalog: &RewardCatalog,
        request: &GrantRequest,
    ) -> Result<GrantOutcome> {
        let (phase, result) = self.execute(snapshot, catalog, request);
        debug!(final_phase = phase.as_str(), "发放流程结束");
        result
    }

    /// 执行发放并返回最终阶段；失败时阶段为 `Failed`
    fn execute(
        &self,
        snapshot: &InventorySnapshot,
        catalog: &RewardCatalog,
        request: &GrantRequest,
    ) -> (GrantPhase, Result<GrantOutcome>) {
        let mut phase = GrantPhase::Idle;

        let result = match self.run(snapshot, catalog, request, &mut phase) {
            Ok(outcome) => {
                info!(
                    book_level_before = outcome.summary.book_level_before,
                    book_level_after = outcome.summary.book_level_after,
                    loot_list_count = outcome.summary.loot_list_count,
                    items_created = outcome.stats.items_created,
                    grants_dropped = outcome.stats.grants_dropped,
                    "等级奖励发放完成"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    failed_in = phase.as_str(),
                    error_code = e.error_code(),
                    error = %e,
                    "等级奖励发放失败"
                );
                enter(&mut phase, GrantPhase::Failed);
                Err(e)
            }
        };

        (phase, result)
    }

    fn run(
        &self,
        snapshot: &InventorySnapshot,
        catalog: &RewardCatalog,
        request: &GrantRequest,
        phase: &mut GrantPhase,
    ) -> Result<GrantOutcome> {
        // 1. 校验
        enter(phase, GrantPhase::Validating);
        if request.tiers_to_add <= 0 {
            return Err(GrantError::InvalidRequest(format!(
                "tiers_to_add 必须为正数: {}",
                request.tiers_to_add
            )));
        }

        let mut ctx = GrantContext::from_snapshot(snapshot)?;
        let starting_tier = ctx.attributes.book_level;
        let ending_tier = starting_tier
            .checked_add(request.tiers_to_add)
            .ok_or_else(|| {
                GrantError::InvalidRequest(format!(
                    "等级溢出: book_level={}, tiers_to_add={}",
                    starting_tier, request.tiers_to_add
                ))
            })?;

        // 2. 发放：等级先推进到终点，再按区间逐级处理
        enter(phase, GrantPhase::Granting);
        ctx.attributes.book_level = ending_tier;
        let book_purchased = ctx.attributes.book_purchased;
        let upper_bound = effective_upper_bound(catalog, ending_tier);
        let mut aggregator = ProgressionAggregator::new();

        for tier in starting_tier..upper_bound {
            let resolved = resolve(catalog, tier);
            if resolved.is_empty() {
                continue;
            }

            self.process_track(&mut ctx, &mut aggregator, tier, RewardTrack::Free, resolved.free)?;
            if book_purchased {
                self.process_track(&mut ctx, &mut aggregator, tier, RewardTrack::Paid, resolved.paid)?;
            }
        }

        // 3. 收尾：礼盒回执与修订号
        enter(phase, GrantPhase::Finalizing);
        let (manifest, stats) = aggregator.into_parts();

        if !manifest.is_empty() {
            let receipt = ItemRecord::new(
                GRANT_RECEIPT_TEMPLATE,
                ItemAttributes::GiftBox(GiftBoxAttributes::new(manifest.entries().to_vec())),
                1,
            );
            ctx.primary.items.insert(GrantContext::new_item_id(), receipt);
        }

        ctx.progression.bump_revision(request.granted_at);
        ctx.primary.bump_revision(request.granted_at);
        ctx.secondary.bump_revision(request.granted_at);

        let summary = GrantSummary {
            tiers_added: request.tiers_to_add,
            book_level_before: starting_tier,
            book_level_after: ending_tier,
            loot_list_count: manifest.len(),
        };

        enter(phase, GrantPhase::Done);
        Ok(GrantOutcome {
            snapshot: ctx.into_snapshot(),
            manifest,
            summary,
            stats,
        })
    }

    /// 处理某个等级某条轨道上的全部奖励，保持目录中的顺序
    fn process_track(
        &self,
        ctx: &mut GrantContext,
        aggregator: &mut ProgressionAggregator,
        tier: i64,
        track: RewardTrack,
        rewards: &RewardSet,
    ) -> Result<()> {
        for line in rewards.lines() {
            let category = classify(&line.item_id);
            let outcome = match self.registry.get(category) {
                Some(strategy) => strategy.apply(ctx, &line)?,
                None => {
                    warn!(
                        category = category.as_str(),
                        item_id = %line.item_id,
                        "类别未注册合并策略，仅记录清单"
                    );
                    MergeOutcome::Recorded
                }
            };
            aggregator.record(tier, track, category, &line, &outcome);
        }
        Ok(())
    }
}

impl Default for TierGrantService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn enter(phase: &mut GrantPhase, next: GrantPhase) {
    debug!(from = phase.as_str(), to = next.as_str(), "发放阶段切换");
    *phase = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Container, TierRewards};
    use serde_json::json;

    fn snapshot(book_level: i64) -> InventorySnapshot {
        let mut progression = Container::new();
        progression
            .stats
            .attributes
            .insert("book_level".into(), json!(book_level));
        InventorySnapshot::new(Container::new(), Container::new(), progression)
    }

    fn catalog() -> RewardCatalog {
        RewardCatalog::new().with_tier(
            1,
            TierRewards::new(
                RewardSet::new().with("Token:SomethingElse", 1),
                RewardSet::new(),
            ),
        )
    }

    #[test]
    fn test_non_positive_tiers_rejected() {
        let service = TierGrantService::with_defaults();
        for tiers in [0, -1] {
            let err = service
                .grant(&snapshot(1), &catalog(), &GrantRequest::new(tiers))
                .unwrap_err();
            assert!(matches!(err, GrantError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_final_phase_done_or_failed() {
        let service = TierGrantService::with_defaults();

        let (phase, result) = service.execute(&snapshot(1), &catalog(), &GrantRequest::new(1));
        assert!(result.is_ok());
        assert_eq!(phase, GrantPhase::Done);

        let (phase, result) = service.execute(&snapshot(1), &catalog(), &GrantRequest::new(0));
        assert!(result.is_err());
        assert_eq!(phase, GrantPhase::Failed);

        let incomplete = InventorySnapshot {
            progression: None,
            ..snapshot(1)
        };
        let (phase, result) = service.execute(&incomplete, &catalog(), &GrantRequest::new(1));
        assert!(matches!(result, Err(GrantError::IncompleteSnapshot(_))));
        assert_eq!(phase, GrantPhase::Failed);
    }

    #[test]
    fn test_level_overflow_rejected() {
        let service = TierGrantService::with_defaults();
        let err = service
            .grant(&snapshot(i64::MAX - 1), &catalog(), &GrantRequest::new(5))
            .unwrap_err();
        assert!(matches!(err, GrantError::InvalidRequest(_)));
    }

    #[test]
    fn test_missing_strategy_only_records() {
        let service = TierGrantService::new(Arc::new(StrategyRegistry::new()));
        let outcome = service
            .grant(&snapshot(1), &catalog(), &GrantRequest::new(1))
            .unwrap();

        assert_eq!(outcome.manifest.len(), 1);
        assert_eq!(outcome.stats, Default::default());
    }

    #[test]
    fn test_receipt_added_when_manifest_non_empty() {
        let service = TierGrantService::with_defaults();
        let outcome = service
            .grant(&snapshot(1), &catalog(), &GrantRequest::new(1))
            .unwrap();

        let primary = outcome.snapshot.primary.unwrap();
        let receipts = primary.items.keys_with_template(GRANT_RECEIPT_TEMPLATE);
        assert_eq!(receipts.len(), 1);
        let receipt = primary.items.get(&receipts[0]).unwrap();
        assert_eq!(receipt.quantity, 1);
        assert!(matches!(
            &receipt.attributes,
            ItemAttributes::GiftBox(gift) if gift.loot_list.len() == 1
        ));
    }

    #[test]
    fn test_no_receipt_past_catalog_end() {
        let service = TierGrantService::with_defaults();
        let outcome = service
            .grant(&snapshot(5), &catalog(), &GrantRequest::new(3))
            .unwrap();

        assert!(outcome.manifest.is_empty());
        assert_eq!(outcome.ending_tier(), 8);
        assert!(outcome.snapshot.primary.unwrap().items.is_empty());
    }
}
