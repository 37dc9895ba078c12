//! 服务层实体模型
//!
//! - `account`: 玩家账号
//! - `profile`: 玩家档案文档与容器解析

mod account;
mod profile;

pub use account::Account;
pub use profile::{
    FALLBACK_PROFILE_ID, PRIMARY_PROFILE_ID, PROGRESSION_PROFILE_ID, ProfileDocument,
    ResolvedProfiles,
};
