//! 发放冷却
//!
//! 同一玩家同一原因在冷却时间内只能成功发放一次。
//! 冷却记录由服务实例持有，随服务注入，不使用全局状态。

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;

/// 冷却记录表
#[derive(Debug, Clone)]
pub struct CooldownLimiter {
    window: Duration,
    last_granted: Arc<DashMap<String, Instant>>,
}

impl CooldownLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_granted: Arc::new(DashMap::new()),
        }
    }

    /// 冷却时间为 0 时不做任何限制
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    fn key(account_id: &str, reason: &str) -> String {
        format!("{}:{}", account_id, reason.to_lowercase())
    }

    /// 剩余冷却时间，不在冷却中时返回 None
    pub fn remaining(&self, account_id: &str, reason: &str) -> Option<Duration> {
        if !self.is_enabled() {
            return None;
        }
        let last = *self.last_granted.get(&Self::key(account_id, reason))?;
        self.window
            .checked_sub(last.elapsed())
            .filter(|left| !left.is_zero())
    }

    /// 记录一次成功发放
    pub fn record(&self, account_id: &str, reason: &str) {
        if self.is_enabled() {
            self.last_granted
                .insert(Self::key(account_id, reason), Instant::now());
        }
    }

    /// 清理已过期的记录，返回清理条数
    pub fn prune_expired(&self) -> usize {
        prune(&self.last_granted, self.window)
    }

    pub fn len(&self) -> usize {
        self.last_granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_granted.is_empty()
    }

    /// 启动后台清理任务，每个冷却窗口清理一次过期记录
    ///
    /// 任务只持有弱引用，所有 `CooldownLimiter` 副本释放后自动退出。
    /// 冷却关闭时不启动任务。
    pub fn spawn_pruner(&self) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            return None;
        }
        let window = self.window;
        let records = Arc::downgrade(&self.last_granted);

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(window);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(records) = records.upgrade() else {
                    break;
                };
                let pruned = prune(&records, window);
                if pruned > 0 {
                    debug!(pruned, remaining = records.len(), "清理过期冷却记录");
                }
            }
        }))
    }
}

fn prune(records: &DashMap<String, Instant>, window: Duration) -> usize {
    let before = records.len();
    records.retain(|_, last| last.elapsed() < window);
    before.saturating_sub(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_never_blocks() {
        let limiter = CooldownLimiter::disabled();
        limiter.record("acc", "daily");
        assert!(limiter.remaining("acc", "daily").is_none());
    }

    #[test]
    fn test_blocks_same_player_and_reason() {
        let limiter = CooldownLimiter::new(Duration::from_secs(60));
        limiter.record("acc", "Daily");

        let left = limiter.remaining("acc", "daily").unwrap();
        assert!(left <= Duration::from_secs(60));
        assert!(limiter.remaining("acc", "weekly").is_none());
        assert!(limiter.remaining("other", "daily").is_none());
    }

    #[tokio::test]
    async fn test_expires_after_window() {
        let limiter = CooldownLimiter::new(Duration::from_millis(20));
        limiter.record("acc", "daily");
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(limiter.remaining("acc", "daily").is_none());
        assert_eq!(limiter.prune_expired(), 1);
        assert!(limiter.is_empty());
    }

    #[tokio::test]
    async fn test_pruner_clears_expired_records() {
        let limiter = CooldownLimiter::new(Duration::from_millis(20));
        let pruner = limiter.spawn_pruner().unwrap();

        for i in 0..100 {
            limiter.record(&format!("acc-{i}"), "daily");
        }
        assert_eq!(limiter.len(), 100);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(limiter.is_empty());

        drop(limiter);
        tokio::time::timeout(Duration::from_secs(1), pruner)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn test_disabled_has_no_pruner() {
        assert!(CooldownLimiter::disabled().spawn_pruner().is_none());
    }
}
