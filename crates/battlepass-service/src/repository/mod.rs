//! 仓储层
//!
//! - `traits`: 账号、档案、赛季目录的协作接口
//! - `memory`: 基于 DashMap 的内存实现（开发与测试）
//! - `catalog_file`: 从 `Season{N}.json` 文件加载赛季目录

mod catalog_file;
mod memory;
mod traits;

pub use catalog_file::FileCatalogLoader;
pub use memory::{InMemoryAccountRepository, InMemoryCatalogLoader, InMemoryProfileRepository};
pub use traits::{AccountRepository, CatalogLoader, ProfileRepository};

#[cfg(test)]
pub use traits::{MockAccountRepository, MockCatalogLoader, MockProfileRepository};
