//! 玩家档案文档
//!
//! 一个账号对应一份档案文档，文档内按名称存放多个容器。
//! 主容器优先取 `common_core`，不存在时退回 `profile0`；
//! 次容器优先取 `profile0`，不存在时与主容器为同一份文档；
//! 进度容器固定为 `athena`。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tier_reward::{Container, InventorySnapshot};

use crate::error::{Result, ServiceError};

pub const PRIMARY_PROFILE_ID: &str = "common_core";
pub const FALLBACK_PROFILE_ID: &str = "profile0";
pub const PROGRESSION_PROFILE_ID: &str = "athena";

/// 玩家档案文档
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub account_id: String,
    #[serde(default)]
    pub profiles: BTreeMap<String, Container>,
}

/// 解析结果：快照以及主/次容器对应的文档名
#[derive(Debug, Clone)]
pub struct ResolvedProfiles {
    pub snapshot: InventorySnapshot,
    pub primary_id: String,
    pub secondary_id: String,
}

impl ResolvedProfiles {
    /// 主、次容器是否指向同一份文档
    pub fn is_aliased(&self) -> bool {
        self.primary_id == self.secondary_id
    }
}

impl ProfileDocument {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            profiles: BTreeMap::new(),
        }
    }

    pub fn with_profile(mut self, profile_id: impl Into<String>, container: Container) -> Self {
        self.profiles.insert(profile_id.into(), container);
        self
    }

    /// 解析出发放所需的三个容器
    ///
    /// 主、次容器为同一文档时，快照中放入两份相同的副本。
    pub fn resolve(&self) -> Result<ResolvedProfiles> {
        let primary_id = [PRIMARY_PROFILE_ID, FALLBACK_PROFILE_ID]
            .into_iter()
            .find(|id| self.profiles.contains_key(*id));
        let secondary_id = if self.profiles.contains_key(FALLBACK_PROFILE_ID) {
            Some(FALLBACK_PROFILE_ID)
        } else {
            primary_id
        };

        let (Some(primary_id), Some(secondary_id)) = (primary_id, secondary_id) else {
            return Err(ServiceError::ProfilesNotFound(
                "缺少 common_core/profile0 容器".to_string(),
            ));
        };
        let Some(progression) = self.profiles.get(PROGRESSION_PROFILE_ID) else {
            return Err(ServiceError::ProfilesNotFound("缺少 athena 容器".to_string()));
        };

        let container = |id: &str| self.profiles.get(id).cloned().unwrap_or_default();
        Ok(ResolvedProfiles {
            snapshot: InventorySnapshot::new(
                container(primary_id),
                container(secondary_id),
                progression.clone(),
            ),
            primary_id: primary_id.to_string(),
            secondary_id: secondary_id.to_string(),
        })
    }

    /// 把发放后的快照写回文档
    ///
    /// 主、次容器为同一文档时只写回主容器副本。
    pub fn apply(&mut self, resolved: &ResolvedProfiles, snapshot: InventorySnapshot) {
        let InventorySnapshot {
            primary,
            secondary,
            progression,
        } = snapshot;

        if let Some(progression) = progression {
            self.profiles
                .insert(PROGRESSION_PROFILE_ID.to_string(), progression);
        }
        if let Some(primary) = primary {
            self.profiles.insert(resolved.primary_id.clone(), primary);
        }
        if !resolved.is_aliased()
            && let Some(secondary) = secondary
        {
            self.profiles.insert(resolved.secondary_id.clone(), secondary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tier_reward::{ItemAttributes, ItemRecord};

    fn tagged(rvn: i64) -> Container {
        Container {
            rvn,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_common_core_and_profile0() {
        let doc = ProfileDocument::new("acc")
            .with_profile("common_core", tagged(1))
            .with_profile("profile0", tagged(2))
            .with_profile("athena", tagged(3));

        let resolved = doc.resolve().unwrap();
        assert_eq!(resolved.primary_id, "common_core");
        assert_eq!(resolved.secondary_id, "profile0");
        assert!(!resolved.is_aliased());
        assert_eq!(resolved.snapshot.primary.unwrap().rvn, 1);
        assert_eq!(resolved.snapshot.secondary.unwrap().rvn, 2);
        assert_eq!(resolved.snapshot.progression.unwrap().rvn, 3);
    }

    #[test]
    fn test_resolve_aliased_when_only_common_core() {
        let doc = ProfileDocument::new("acc")
            .with_profile("common_core", tagged(5))
            .with_profile("athena", tagged(1));

        let resolved = doc.resolve().unwrap();
        assert!(resolved.is_aliased());
        assert_eq!(resolved.secondary_id, "common_core");
        assert_eq!(resolved.snapshot.secondary.unwrap().rvn, 5);
    }

    #[test]
    fn test_resolve_only_profile0() {
        let doc = ProfileDocument::new("acc")
            .with_profile("profile0", tagged(7))
            .with_profile("athena", tagged(1));

        let resolved = doc.resolve().unwrap();
        assert_eq!(resolved.primary_id, "profile0");
        assert!(resolved.is_aliased());
    }

    #[test]
    fn test_resolve_missing_profiles() {
        let doc = ProfileDocument::new("acc").with_profile("athena", tagged(1));
        assert!(matches!(doc.resolve(), Err(ServiceError::ProfilesNotFound(_))));

        let doc = ProfileDocument::new("acc").with_profile("common_core", tagged(1));
        assert!(matches!(doc.resolve(), Err(ServiceError::ProfilesNotFound(_))));
    }

    #[test]
    fn test_apply_aliased_writes_primary_only() {
        let mut doc = ProfileDocument::new("acc")
            .with_profile("common_core", tagged(1))
            .with_profile("athena", tagged(1));
        let resolved = doc.resolve().unwrap();

        let primary = tagged(2).with_item(
            "gift",
            ItemRecord::new("GiftBox:gb_battlepass", ItemAttributes::default(), 1),
        );
        let snapshot = InventorySnapshot::new(primary, tagged(2), tagged(2));
        doc.apply(&resolved, snapshot);

        assert_eq!(doc.profiles.len(), 2);
        assert!(doc.profiles["common_core"].items.contains_key("gift"));
        assert_eq!(doc.profiles["athena"].rvn, 2);
    }

    #[test]
    fn test_apply_distinct_writes_both() {
        let mut doc = ProfileDocument::new("acc")
            .with_profile("common_core", tagged(1))
            .with_profile("profile0", tagged(1))
            .with_profile("athena", tagged(1));
        let resolved = doc.resolve().unwrap();

        doc.apply(
            &resolved,
            InventorySnapshot::new(tagged(2), tagged(3), tagged(4)),
        );

        assert_eq!(doc.profiles["common_core"].rvn, 2);
        assert_eq!(doc.profiles["profile0"].rvn, 3);
        assert_eq!(doc.profiles["athena"].rvn, 4);
    }
}
