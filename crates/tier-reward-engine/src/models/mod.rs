//! 领域模型定义
//!
//! - `item`: 物品条目与按类别区分的属性
//! - `container`: 容器、有序物品表、修订戳
//! - `snapshot`: 库存快照与通行证进度属性
//! - `catalog`: 赛季奖励目录
//! - `manifest`: 发放清单与汇总

mod catalog;
mod container;
mod item;
mod manifest;
mod snapshot;

pub use catalog::{RewardCatalog, RewardLine, RewardSet, TierRewards};
pub use container::{Container, ContainerStats, ItemMap, RevisionStamp};
pub use item::{
    BannerAttributes, CosmeticAttributes, GiftBoxAttributes, ItemAttributes, ItemRecord,
};
pub use manifest::{GrantStats, GrantSummary, LootManifest, LootManifestEntry};
pub use snapshot::{
    BOOK_LEVEL_KEY, BOOK_PURCHASED_KEY, ContainerRole, InventorySnapshot, ProgressionAttributes,
    SEASON_FRIEND_MATCH_BOOST_KEY, SEASON_MATCH_BOOST_KEY,
};
