//! 通行证等级发放服务
//!
//! 把引擎与外部协作方串起来：
//! - 发放原因校验与等级数换算
//! - 账号查找（用户名去空白、忽略大小写）
//! - 同一玩家串行化与冷却检查
//! - 档案解析、赛季目录加载
//! - 调用引擎计算并整体写回档案
//!
//! ## 发放流程
//!
//! 1. 原因校验 -> 2. 开关检查 -> 3. 账号查找 -> 4. 玩家锁
//!    -> 5. 冷却检查 -> 6. 档案解析 -> 7. 目录加载 -> 8. 引擎发放
//!    -> 9. 写回档案 -> 10. 记录冷却

use std::sync::Arc;
use std::time::Instant;

use battlepass_shared::config::BattlePassConfig;
use battlepass_shared::observability::metrics::record_tier_grant;
use tier_reward::{GrantRequest, TierGrantService};
use tracing::{info, instrument, warn};

use crate::cooldown::CooldownLimiter;
use crate::error::{Result, ServiceError};
use crate::lock::PlayerLocks;
use crate::models::Account;
use crate::repository::{AccountRepository, CatalogLoader, ProfileRepository};

use super::dto::TierGrantReceipt;

/// 通行证等级发放服务
pub struct BattlePassGrantService {
    accounts: Arc<dyn AccountRepository>,
    profiles: Arc<dyn ProfileRepository>,
    catalogs: Arc<dyn CatalogLoader>,
    engine: TierGrantService,
    locks: PlayerLocks,
    cooldown: CooldownLimiter,
    config: BattlePassConfig,
}

impl BattlePassGrantService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        profiles: Arc<dyn ProfileRepository>,
        catalogs: Arc<dyn CatalogLoader>,
        config: BattlePassConfig,
    ) -> Self {
        let cooldown = CooldownLimiter::new(std::time::Duration::from_secs(config.cooldown_secs));
        Self {
            accounts,
            profiles,
            catalogs,
            engine: TierGrantService::with_defaults(),
            locks: PlayerLocks::new(),
            cooldown,
            config,
        }
    }

    pub fn config(&self) -> &BattlePassConfig {
        &self.config
    }

    pub fn cooldown(&self) -> &CooldownLimiter {
        &self.cooldown
    }

    /// 按发放原因为玩家增加等级
    #[instrument(skip(self), fields(season = %self.config.season_name()))]
    pub async fn grant_tiers(&self, username: &str, reason: &str) -> Result<TierGrantReceipt> {
        let started = Instant::now();
        let result = self.grant_tiers_inner(username, reason).await;
        let elapsed = started.elapsed().as_secs_f64();

        let reason_label = self.reason_label(reason);
        match &result {
            Ok(receipt) => record_tier_grant(
                &reason_label,
                "success",
                receipt.tiers_added.unsigned_abs(),
                receipt.summary.loot_list_count as u64,
                elapsed,
            ),
            Err(e) => {
                warn!(error_code = e.error_code(), error = %e, "通行证等级发放失败");
                record_tier_grant(&reason_label, e.metric_status(), 0, 0, elapsed);
            }
        }

        result
    }

    async fn grant_tiers_inner(&self, username: &str, reason: &str) -> Result<TierGrantReceipt> {
        // 1. 原因校验
        let tiers_to_add = self.config.tiers_for_reason(reason).ok_or_else(|| {
            ServiceError::Validation(format!(
                "Invalid reason. Allowed values: {}",
                self.config.allowed_reasons().join(", ")
            ))
        })?;

        // 2. 开关检查
        if !self.config.enabled {
            return Err(ServiceError::BattlePassDisabled);
        }

        // 3. 账号查找
        let username_lower = Account::normalize_username(username);
        if username_lower.is_empty() {
            return Err(ServiceError::Validation("Missing username.".to_string()));
        }
        let account = self
            .accounts
            .find_by_username(&username_lower)
            .await?
            .ok_or(ServiceError::PlayerNotFound)?;

        // 4. 同一玩家串行化，锁内完成读-算-写
        let _guard = self.locks.acquire(&account.account_id).await;

        // 5. 冷却检查
        if let Some(left) = self.cooldown.remaining(&account.account_id, reason) {
            let retry_after_secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            return Err(ServiceError::CooldownActive { retry_after_secs });
        }

        // 6. 档案解析
        let mut document = self
            .profiles
            .load(&account.account_id)
            .await?
            .ok_or_else(|| ServiceError::ProfilesNotFound(account.account_id.clone()))?;
        let resolved = document.resolve()?;

        // 7. 目录加载
        let catalog = self.catalogs.load(&self.config.season_name()).await?;

        // 8. 引擎发放
        let outcome = self.engine.grant(
            &resolved.snapshot,
            &catalog,
            &GrantRequest::new(tiers_to_add),
        )?;

        // 9. 写回档案
        document.apply(&resolved, outcome.snapshot);
        self.profiles.save(&document).await?;

        // 10. 记录冷却
        self.cooldown.record(&account.account_id, reason);

        info!(
            account_id = %account.account_id,
            tiers_added = tiers_to_add,
            book_level_before = outcome.summary.book_level_before,
            book_level_after = outcome.summary.book_level_after,
            loot_list_count = outcome.summary.loot_list_count,
            "通行证等级发放成功"
        );

        Ok(TierGrantReceipt {
            username: account.username,
            reason: reason.to_string(),
            tiers_added: tiers_to_add,
            summary: outcome.summary,
            stats: outcome.stats,
        })
    }

    /// 指标标签只使用已配置的原因，避免基数膨胀
    fn reason_label(&self, reason: &str) -> String {
        if self.config.tiers_for_reason(reason).is_some() {
            reason.to_lowercase()
        } else {
            "unknown".to_string()
        }
    }
}
