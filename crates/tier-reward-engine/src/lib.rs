//! 通行证等级奖励发放引擎
//!
//! 给定赛季奖励目录、玩家库存快照以及要增加的等级数，计算解锁的奖励，
//! 按物品类别合并到正确的容器中，并生成可审计的发放清单。
//!
//! ## 核心功能
//!
//! - **物品分类**：按物品标识文本把奖励路由到不同的合并策略
//! - **奖励合并**：已存在的物品重新标记为未查看，不会重复创建；数量类奖励累加
//! - **进度汇总**：维护经验加成计数器与发放清单
//! - **修订号维护**：一次发放后三个容器的修订号统一推进
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `classifier`: 物品分类器
//! - `strategy`: 合并策略与注册表
//! - `resolver`: 等级奖励解析
//! - `aggregator`: 发放清单与计数汇总
//! - `service`: 发放编排器

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod models;
pub mod resolver;
pub mod service;
pub mod strategy;

pub use aggregator::{ProgressionAggregator, RewardTrack};
pub use classifier::{ItemCategory, classify};
pub use error::{GrantError, Result};
pub use models::*;
pub use resolver::{ResolvedTier, effective_upper_bound, resolve};
pub use service::{GrantOutcome, GrantPhase, GrantRequest, TierGrantService, dto};
pub use service::grant_service::GRANT_RECEIPT_TEMPLATE;
pub use strategy::{
    BoostCounter, GrantContext, MergeOutcome, MergeStrategy, StrategyRegistry,
};
