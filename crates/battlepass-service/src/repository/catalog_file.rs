//! 文件赛季目录加载器
//!
//! 从 `{catalog_dir}/{season}.json` 读取赛季目录，每次请求重新读取，
//! 运营替换文件后无需重启服务。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tier_reward::{GrantError, RewardCatalog};
use tracing::{debug, instrument};

use super::traits::CatalogLoader;
use crate::error::Result;

/// 文件赛季目录加载器
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    dir: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 赛季文件路径
    pub fn season_path(&self, season: &str) -> PathBuf {
        self.dir.join(format!("{season}.json"))
    }
}

#[async_trait]
impl CatalogLoader for FileCatalogLoader {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn load(&self, season: &str) -> Result<RewardCatalog> {
        // 赛季名只允许字母数字，避免路径穿越
        if season.is_empty() || !season.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GrantError::catalog_unavailable(season, "非法的赛季名").into());
        }

        let path = self.season_path(season);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| GrantError::catalog_unavailable(season, e))?;

        let catalog = RewardCatalog::from_json_str(season, &content)?;
        debug!(
            path = %path.display(),
            highest_tier = catalog.highest_tier(),
            "赛季目录加载完成"
        );
        Ok(catalog)
    }
}
