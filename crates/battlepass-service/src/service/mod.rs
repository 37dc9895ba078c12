//! 服务层
//!
//! - `dto`: 服务层结果
//! - `grant_service`: 通行证等级发放服务

pub mod dto;
pub mod grant_service;

pub use dto::TierGrantReceipt;
pub use grant_service::BattlePassGrantService;
