//! 合并策略实现
//!
//! - `XpBoostStrategy`: 经验加成，只修改通行证计数器
//! - `CurrencyStrategy`: 货币，累加主容器钱包并同步次容器
//! - `BannerStrategy`: 主页旗帜，写入主容器
//! - `CosmeticStrategy`: 外观物品，写入进度容器
//! - `GenericStrategy`: 仅记录清单

mod banner;
mod cosmetic;
mod currency;
mod generic;
mod xp_boost;

pub use banner::BannerStrategy;
pub use cosmetic::CosmeticStrategy;
pub use currency::CurrencyStrategy;
pub use generic::GenericStrategy;
pub use xp_boost::XpBoostStrategy;
