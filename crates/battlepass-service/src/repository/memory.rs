//! 内存仓储
//!
//! 使用 DashMap 实现的高并发内存存储，适用于开发环境和测试。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tier_reward::{GrantError, RewardCatalog};

use super::traits::{AccountRepository, CatalogLoader, ProfileRepository};
use crate::error::Result;
use crate::models::{Account, ProfileDocument};

/// 内存账号仓储，按规范化用户名索引
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<DashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入或覆盖账号
    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.username_lower.clone(), account);
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username_lower: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get(username_lower).map(|v| v.clone()))
    }
}

/// 内存档案仓储，按账号 ID 索引
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileRepository {
    documents: Arc<DashMap<String, ProfileDocument>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: ProfileDocument) {
        self.documents.insert(document.account_id.clone(), document);
    }

    /// 返回文档的克隆，不持有锁
    pub fn get(&self, account_id: &str) -> Option<ProfileDocument> {
        self.documents.get(account_id).map(|v| v.clone())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self, account_id: &str) -> Result<Option<ProfileDocument>> {
        Ok(self.get(account_id))
    }

    async fn save(&self, document: &ProfileDocument) -> Result<()> {
        self.insert(document.clone());
        Ok(())
    }
}

/// 内存赛季目录，按赛季名索引
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogLoader {
    catalogs: Arc<DashMap<String, RewardCatalog>>,
}

impl InMemoryCatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, season: impl Into<String>, catalog: RewardCatalog) {
        self.catalogs.insert(season.into(), catalog);
    }
}

#[async_trait]
impl CatalogLoader for InMemoryCatalogLoader {
    async fn load(&self, season: &str) -> Result<RewardCatalog> {
        self.catalogs
            .get(season)
            .map(|v| v.clone())
            .ok_or_else(|| GrantError::catalog_unavailable(season, "赛季目录未加载").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    #[tokio::test]
    async fn test_account_lookup_by_normalized_name() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(Account::new("acc-1", "PlayerOne"));

        let found = repo.find_by_username("playerone").await.unwrap();
        assert_eq!(found.map(|a| a.account_id), Some("acc-1".to_string()));
        assert!(repo.find_by_username("PlayerOne").await.unwrap().is_none());
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_profile_save_replaces_document() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(ProfileDocument::new("acc-1"));

        let mut doc = repo.load("acc-1").await.unwrap().unwrap();
        doc.profiles.insert("athena".into(), Default::default());
        repo.save(&doc).await.unwrap();

        assert_eq!(repo.get("acc-1").unwrap().profiles.len(), 1);
        assert!(repo.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_catalog_is_catalog_error() {
        let loader = InMemoryCatalogLoader::new();
        loader.insert("Season1", RewardCatalog::new());

        assert!(loader.load("Season1").await.is_ok());
        let err = loader.load("Season2").await.unwrap_err();
        assert!(matches!(err, ServiceError::Catalog { .. }));
    }
}
