//! 合并策略模块
//!
//! 奖励合并采用策略模式：`MergeStrategy` trait 定义统一接口，
//! 每个奖励类别（经验加成、货币、旗帜、外观、其他）实现各自的策略，
//! `StrategyRegistry` 负责按类别路由。
//!
//! 所有策略只修改 `GrantContext` 工作集，不直接接触调用方的快照。

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use context::GrantContext;
pub use handler::{BoostCounter, MergeOutcome, MergeStrategy};
pub use handlers::{
    BannerStrategy, CosmeticStrategy, CurrencyStrategy, GenericStrategy, XpBoostStrategy,
};
pub use registry::StrategyRegistry;
