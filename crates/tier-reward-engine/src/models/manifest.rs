//! 发放清单与汇总

use serde::{Deserialize, Serialize};

/// 清单条目：每处理一条奖励记录一条，与是否实际修改容器无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LootManifestEntry {
    pub item_type: String,
    pub item_guid: String,
    pub quantity: i64,
}

impl LootManifestEntry {
    pub fn new(item_id: impl Into<String>, quantity: i64) -> Self {
        let item_id = item_id.into();
        Self {
            item_type: item_id.clone(),
            item_guid: item_id,
            quantity,
        }
    }
}

/// 按处理顺序排列的发放清单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LootManifest {
    entries: Vec<LootManifestEntry>,
}

impl LootManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LootManifestEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LootManifestEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &LootManifestEntry> {
        self.entries.iter()
    }
}

/// 发放汇总（对外返回）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSummary {
    pub tiers_added: i64,
    pub book_level_before: i64,
    pub book_level_after: i64,
    pub loot_list_count: usize,
}

/// 发放过程中累计的派生计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantStats {
    /// 本次新增的对局经验加成
    pub season_match_boost_added: i64,
    /// 本次新增的好友对局经验加成
    pub season_friend_match_boost_added: i64,
    /// 本次增加的货币数量（仅统计实际入账的部分）
    pub currency_added: i64,
    pub items_created: usize,
    pub items_resurfaced: usize,
    /// 因找不到钱包条目而未入账的货币奖励条数
    pub grants_dropped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_wire_format() {
        let entry = LootManifestEntry::new("AthenaCharacter:CID_A", 1);
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"itemType": "AthenaCharacter:CID_A", "itemGuid": "AthenaCharacter:CID_A", "quantity": 1})
        );
    }

    #[test]
    fn test_manifest_serializes_as_list() {
        let mut manifest = LootManifest::new();
        manifest.push(LootManifestEntry::new("A", 1));
        manifest.push(LootManifestEntry::new("B", 2));

        let value = serde_json::to_value(&manifest).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }
}
