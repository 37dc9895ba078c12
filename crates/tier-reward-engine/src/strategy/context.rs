//! 发放工作集
//!
//! 编排器把快照复制为工作集，所有策略只修改工作集；
//! 失败时直接丢弃工作集，调用方持有的快照不受影响。

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Container, ContainerRole, InventorySnapshot, ProgressionAttributes};

/// 一次发放操作的可变工作集
#[derive(Debug, Clone)]
pub struct GrantContext {
    pub primary: Container,
    pub secondary: Container,
    pub progression: Container,
    /// 已归一化的通行证属性，结束时写回进度容器
    pub attributes: ProgressionAttributes,
}

impl GrantContext {
    /// 从快照复制工作集，三个容器缺一不可
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Result<Self> {
        let primary = snapshot.require(ContainerRole::Primary)?.clone();
        let secondary = snapshot.require(ContainerRole::Secondary)?.clone();
        let progression = snapshot.require(ContainerRole::Progression)?.clone();
        let attributes = ProgressionAttributes::from_stats(&progression.stats.attributes);

        Ok(Self {
            primary,
            secondary,
            progression,
            attributes,
        })
    }

    pub fn container_mut(&mut self, role: ContainerRole) -> &mut Container {
        match role {
            ContainerRole::Primary => &mut self.primary,
            ContainerRole::Secondary => &mut self.secondary,
            ContainerRole::Progression => &mut self.progression,
        }
    }

    /// 写回通行证属性并转换为快照
    pub fn into_snapshot(mut self) -> InventorySnapshot {
        self.attributes
            .write_to(&mut self.progression.stats.attributes);
        InventorySnapshot::new(self.primary, self.secondary, self.progression)
    }

    /// 生成新的物品实例 ID
    pub fn new_item_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrantError;
    use serde_json::json;

    #[test]
    fn test_from_snapshot_normalizes_attributes() {
        let snapshot = InventorySnapshot::new(Container::new(), Container::new(), Container::new());
        let ctx = GrantContext::from_snapshot(&snapshot).unwrap();
        assert_eq!(ctx.attributes, ProgressionAttributes::default());
    }

    #[test]
    fn test_from_snapshot_missing_secondary() {
        let snapshot = InventorySnapshot {
            primary: Some(Container::new()),
            secondary: None,
            progression: Some(Container::new()),
        };
        let err = GrantContext::from_snapshot(&snapshot).unwrap_err();
        assert!(matches!(err, GrantError::IncompleteSnapshot(_)));
    }

    #[test]
    fn test_into_snapshot_writes_attributes() {
        let snapshot = InventorySnapshot::new(Container::new(), Container::new(), Container::new());
        let mut ctx = GrantContext::from_snapshot(&snapshot).unwrap();
        ctx.attributes.book_level = 9;
        ctx.attributes.season_match_boost = 3;

        let out = ctx.into_snapshot();
        let attrs = &out.progression.as_ref().unwrap().stats.attributes;
        assert_eq!(attrs.get("book_level"), Some(&json!(9)));
        assert_eq!(attrs.get("season_match_boost"), Some(&json!(3)));
        assert_eq!(attrs.get("book_purchased"), Some(&json!(false)));
    }
}
