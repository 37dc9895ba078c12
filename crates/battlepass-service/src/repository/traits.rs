//! 仓储 Trait 定义
//!
//! 服务层依赖抽象而非具体实现，便于替换存储并支持 mock 测试

use async_trait::async_trait;
use tier_reward::RewardCatalog;

use crate::error::Result;
use crate::models::{Account, ProfileDocument};

/// 账号仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 按规范化用户名（去空白、小写）查找账号
    async fn find_by_username(&self, username_lower: &str) -> Result<Option<Account>>;
}

/// 档案仓储接口
///
/// `save` 需整体替换文档，调用方负责同一账号的写入串行化。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn load(&self, account_id: &str) -> Result<Option<ProfileDocument>>;
    async fn save(&self, document: &ProfileDocument) -> Result<()>;
}

/// 赛季目录加载接口
///
/// 加载失败必须返回 `ServiceError::Catalog`，与发放逻辑错误区分开。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load(&self, season: &str) -> Result<RewardCatalog>;
}
