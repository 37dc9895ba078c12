//! 容器（玩家档案文档）定义
//!
//! 容器持有按实例 ID 索引的物品条目、统计属性以及修订号。
//! 物品的遍历顺序即文档中的插入顺序，货币「第一个匹配」依赖这一点。

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::item::ItemRecord;

/// 有序物品表
///
/// 保持插入顺序；同一 key 重复插入时原位替换。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemMap {
    entries: IndexMap<String, ItemRecord>,
}

impl ItemMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ItemRecord> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ItemRecord> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 插入条目，返回被替换的旧值
    pub fn insert(&mut self, key: impl Into<String>, item: ItemRecord) -> Option<ItemRecord> {
        self.entries.insert(key.into(), item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ItemRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ItemRecord)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// 按模板 ID（忽略大小写）查找所有匹配条目的 key
    pub fn keys_with_template(&self, identifier: &str) -> Vec<String> {
        let lowered = identifier.to_lowercase();
        self.entries
            .iter()
            .filter(|(_, item)| item.template_matches_lowercase(&lowered))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// 修订戳
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionStamp {
    pub rvn: i64,
    pub command_revision: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 容器统计信息
///
/// `attributes` 中除通行证字段外的其他属性原样保留。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStats {
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 容器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub rvn: i64,
    #[serde(default)]
    pub command_revision: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: ItemMap,
    #[serde(default)]
    pub stats: ContainerStats,
    /// 其他文档字段（profileId、version 等），原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: impl Into<String>, item: ItemRecord) -> Self {
        self.items.insert(key, item);
        self
    }

    pub fn revision(&self) -> RevisionStamp {
        RevisionStamp {
            rvn: self.rvn,
            command_revision: self.command_revision,
            updated_at: self.updated,
        }
    }

    /// 修订号各加 1，并记录本次操作时间
    pub fn bump_revision(&mut self, at: DateTime<Utc>) {
        self.rvn += 1;
        self.command_revision += 1;
        self.updated = Some(at);
    }
}
