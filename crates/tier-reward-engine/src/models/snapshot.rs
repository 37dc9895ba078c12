//! 玩家库存快照与通行证进度属性

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::container::Container;
use crate::error::{GrantError, Result};

pub const BOOK_LEVEL_KEY: &str = "book_level";
pub const BOOK_PURCHASED_KEY: &str = "book_purchased";
pub const SEASON_MATCH_BOOST_KEY: &str = "season_match_boost";
pub const SEASON_FRIEND_MATCH_BOOST_KEY: &str = "season_friend_match_boost";

/// 快照中的容器角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    /// 主容器：通用物品、旗帜、货币
    Primary,
    /// 次容器：货币镜像
    Secondary,
    /// 进度容器：外观物品与通行证属性
    Progression,
}

impl ContainerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Progression => "progression",
        }
    }
}

/// 玩家库存快照
///
/// 由调用方解析好三个容器后传入；若主、次容器实际上是同一份文档，
/// 调用方传入两份相同的副本，并自行决定回写哪一份。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub primary: Option<Container>,
    pub secondary: Option<Container>,
    pub progression: Option<Container>,
}

impl InventorySnapshot {
    pub fn new(primary: Container, secondary: Container, progression: Container) -> Self {
        Self {
            primary: Some(primary),
            secondary: Some(secondary),
            progression: Some(progression),
        }
    }

    pub fn container(&self, role: ContainerRole) -> Option<&Container> {
        match role {
            ContainerRole::Primary => self.primary.as_ref(),
            ContainerRole::Secondary => self.secondary.as_ref(),
            ContainerRole::Progression => self.progression.as_ref(),
        }
    }

    /// 取出必需的容器，缺失时返回 `IncompleteSnapshot`
    pub fn require(&self, role: ContainerRole) -> Result<&Container> {
        self.container(role).ok_or_else(|| {
            GrantError::IncompleteSnapshot(format!("缺少{}容器", role.as_str()))
        })
    }

    /// 读取进度属性（缺失字段按默认值补齐）
    pub fn progression_attributes(&self) -> Option<ProgressionAttributes> {
        self.progression
            .as_ref()
            .map(|c| ProgressionAttributes::from_stats(&c.stats.attributes))
    }
}

/// 通行证进度属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionAttributes {
    pub book_level: i64,
    pub book_purchased: bool,
    pub season_match_boost: i64,
    pub season_friend_match_boost: i64,
}

impl Default for ProgressionAttributes {
    fn default() -> Self {
        Self {
            book_level: 1,
            book_purchased: false,
            season_match_boost: 0,
            season_friend_match_boost: 0,
        }
    }
}

impl ProgressionAttributes {
    /// 从统计属性中读取，缺失或类型不符的字段使用默认值
    ///
    /// 等级小于 1、加成为负数同样视为无效并归一化。
    pub fn from_stats(attributes: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            book_level: whole_number(attributes.get(BOOK_LEVEL_KEY))
                .filter(|level| *level >= 1)
                .unwrap_or(defaults.book_level),
            book_purchased: attributes
                .get(BOOK_PURCHASED_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(defaults.book_purchased),
            season_match_boost: whole_number(attributes.get(SEASON_MATCH_BOOST_KEY))
                .filter(|boost| *boost >= 0)
                .unwrap_or(defaults.season_match_boost),
            season_friend_match_boost: whole_number(attributes.get(SEASON_FRIEND_MATCH_BOOST_KEY))
                .filter(|boost| *boost >= 0)
                .unwrap_or(defaults.season_friend_match_boost),
        }
    }

    /// 写回统计属性，其他 key 不受影响
    pub fn write_to(&self, attributes: &mut Map<String, Value>) {
        attributes.insert(BOOK_LEVEL_KEY.to_string(), Value::from(self.book_level));
        attributes.insert(BOOK_PURCHASED_KEY.to_string(), Value::Bool(self.book_purchased));
        attributes.insert(
            SEASON_MATCH_BOOST_KEY.to_string(),
            Value::from(self.season_match_boost),
        );
        attributes.insert(
            SEASON_FRIEND_MATCH_BOOST_KEY.to_string(),
            Value::from(self.season_friend_match_boost),
        );
    }
}

/// 文档存储可能把整数存成浮点（如 `3.0`），这里统一按整数读取
pub(crate) fn whole_number(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_defaults_when_missing() {
        let parsed = ProgressionAttributes::from_stats(&Map::new());
        assert_eq!(parsed, ProgressionAttributes::default());
        assert_eq!(parsed.book_level, 1);
        assert!(!parsed.book_purchased);
    }

    #[test]
    fn test_wrong_types_normalized() {
        let parsed = ProgressionAttributes::from_stats(&attrs(json!({
            "book_level": "7",
            "book_purchased": 1,
            "season_match_boost": null,
            "season_friend_match_boost": -3
        })));
        assert_eq!(parsed, ProgressionAttributes::default());
    }

    #[test]
    fn test_reads_existing_values() {
        let parsed = ProgressionAttributes::from_stats(&attrs(json!({
            "book_level": 12.0,
            "book_purchased": true,
            "season_match_boost": 40,
            "season_friend_match_boost": 10
        })));
        assert_eq!(parsed.book_level, 12);
        assert!(parsed.book_purchased);
        assert_eq!(parsed.season_match_boost, 40);
        assert_eq!(parsed.season_friend_match_boost, 10);
    }

    #[test]
    fn test_zero_level_normalized() {
        let parsed = ProgressionAttributes::from_stats(&attrs(json!({"book_level": 0})));
        assert_eq!(parsed.book_level, 1);
    }

    #[test]
    fn test_write_to_keeps_other_keys() {
        let mut map = attrs(json!({"level": 80, "book_level": 2}));
        let progression = ProgressionAttributes {
            book_level: 5,
            ..Default::default()
        };
        progression.write_to(&mut map);

        assert_eq!(map.get("level"), Some(&json!(80)));
        assert_eq!(map.get("book_level"), Some(&json!(5)));
        assert_eq!(map.get("book_purchased"), Some(&json!(false)));
    }

    #[test]
    fn test_require_missing_container() {
        let snapshot = InventorySnapshot {
            primary: Some(Container::new()),
            secondary: Some(Container::new()),
            progression: None,
        };

        assert!(snapshot.require(ContainerRole::Primary).is_ok());
        let err = snapshot.require(ContainerRole::Progression).unwrap_err();
        assert!(matches!(err, GrantError::IncompleteSnapshot(_)));
        assert!(err.to_string().contains("progression"));
    }
}
