//! 发放服务层
//!
//! - `dto`: 请求与结果
//! - `grant_service`: 等级奖励发放编排器

pub mod dto;
pub mod grant_service;

pub use dto::*;
pub use grant_service::TierGrantService;
