//! 进程内玩家锁
//!
//! 每个账号一把异步互斥锁，锁对象按需创建；最后一个持有者释放时
//! 若没有等待者，条目随之移除，注册表大小只与在途请求数有关。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

/// 玩家锁注册表
///
/// 由调用方显式持有并注入服务，不使用进程级全局状态。
#[derive(Debug, Default, Clone)]
pub struct PlayerLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// 锁守卫，离开作用域时释放
#[derive(Debug)]
pub struct PlayerLockGuard {
    account_id: String,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for PlayerLockGuard {
    fn drop(&mut self) {
        // 注册表与本守卫各持有一份引用；更多引用说明还有等待者
        let removed = self
            .locks
            .remove_if(&self.account_id, |_, lock| Arc::strong_count(lock) <= 2)
            .is_some();
        if removed {
            debug!(account_id = %self.account_id, "玩家锁空闲，已移除");
        }
    }
}

impl PlayerLockGuard {
    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取指定账号的锁，已被占用时等待
    #[instrument(skip(self))]
    pub async fn acquire(&self, account_id: &str) -> PlayerLockGuard {
        let lock = self
            .locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = lock.lock_owned().await;
        debug!("玩家锁已获取");

        PlayerLockGuard {
            account_id: account_id.to_string(),
            locks: Arc::clone(&self.locks),
            _guard: guard,
        }
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_player_serialized() {
        let locks = PlayerLocks::new();
        let guard = locks.acquire("acc-1").await;
        assert_eq!(guard.account_id(), "acc-1");

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move { locks.acquire("acc-1").await.account_id().to_string() })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        let acquired = tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(acquired, "acc-1");
    }

    #[tokio::test]
    async fn test_different_players_independent() {
        let locks = PlayerLocks::new();
        let _a = locks.acquire("acc-1").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("acc-2")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_entry_removed_when_released() {
        let locks = PlayerLocks::new();
        let held = locks.acquire("acc-1").await;
        drop(locks.acquire("acc-2").await);

        assert_eq!(locks.len(), 1);
        drop(held);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_entry_kept_while_waiter_queued() {
        let locks = PlayerLocks::new();
        let held = locks.acquire("acc-1").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let guard = locks.acquire("acc-1").await;
                tokio::time::sleep(Duration::from_millis(20)).await;
                drop(guard);
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(held);
        assert_eq!(locks.len(), 1);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_many_players_leave_no_entries() {
        let locks = PlayerLocks::new();
        for i in 0..1000 {
            drop(locks.acquire(&format!("acc-{i}")).await);
        }
        assert!(locks.is_empty());
    }
}
