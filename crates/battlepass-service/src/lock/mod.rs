//! 玩家锁模块
//!
//! 同一玩家的发放操作必须串行：读取快照、计算、写回之间不能插入其他写入。

mod player_lock;

pub use player_lock::{PlayerLockGuard, PlayerLocks};
