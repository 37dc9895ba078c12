//! 物品条目与属性定义
//!
//! 属性按物品类别建模为带类型的联合体，而不是开放的 key-value 映射。
//! 只有无法识别的历史属性才落入 `Other`，原样保留。

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

use super::manifest::LootManifestEntry;
use super::snapshot::whole_number;

/// 容器内的单个物品条目
///
/// 以实例 ID 为 key 存放在容器中，`template_id` 比较时忽略大小写。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub attributes: ItemAttributes,
    #[serde(default, deserialize_with = "whole_quantity")]
    pub quantity: i64,
}

/// 数量允许整数值的浮点（`50.0`），`null` 视为 0，其余非整数拒绝
fn whole_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    whole_number(Some(&value))
        .ok_or_else(|| de::Error::custom(format!("quantity must be a whole number, got {value}")))
}

impl ItemRecord {
    pub fn new(template_id: impl Into<String>, attributes: ItemAttributes, quantity: i64) -> Self {
        Self {
            template_id: template_id.into(),
            attributes,
            quantity,
        }
    }

    /// 模板 ID 是否与给定标识相同（忽略大小写）
    pub fn template_matches(&self, identifier: &str) -> bool {
        self.template_matches_lowercase(&identifier.to_lowercase())
    }

    /// 与 `template_matches` 相同，但标识已由调用方转成小写
    pub fn template_matches_lowercase(&self, lowered: &str) -> bool {
        if self.template_id.is_empty() {
            return false;
        }
        if self.template_id.is_ascii() {
            self.template_id.eq_ignore_ascii_case(lowered)
        } else {
            self.template_id.to_lowercase() == lowered
        }
    }

    /// 模板 ID 是否以给定前缀开头（前缀需为小写）
    pub fn template_starts_with(&self, lowercase_prefix: &str) -> bool {
        !self.template_id.is_empty() && self.template_id.to_lowercase().starts_with(lowercase_prefix)
    }
}

/// 物品属性
///
/// 反序列化时依次尝试礼盒、外观、旗帜三种严格结构，都不匹配时保留为原始映射。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemAttributes {
    GiftBox(GiftBoxAttributes),
    Cosmetic(CosmeticAttributes),
    Banner(BannerAttributes),
    Other(Map<String, Value>),
}

impl Default for ItemAttributes {
    fn default() -> Self {
        Self::Other(Map::new())
    }
}

impl ItemAttributes {
    /// 标记为「新获得」，重新在客户端展示
    pub fn mark_unseen(&mut self) {
        match self {
            Self::Cosmetic(attrs) => attrs.item_seen = false,
            Self::Banner(attrs) => attrs.item_seen = false,
            Self::Other(map) => {
                map.insert("item_seen".to_string(), Value::Bool(false));
            }
            Self::GiftBox(attrs) => {
                let mut map = attrs.to_map();
                map.insert("item_seen".to_string(), Value::Bool(false));
                *self = Self::Other(map);
            }
        }
    }

    /// 读取 `item_seen` 标记，不存在时返回 None
    pub fn item_seen(&self) -> Option<bool> {
        match self {
            Self::Cosmetic(attrs) => Some(attrs.item_seen),
            Self::Banner(attrs) => Some(attrs.item_seen),
            Self::Other(map) => map.get("item_seen").and_then(Value::as_bool),
            Self::GiftBox(_) => None,
        }
    }
}

/// 旗帜属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BannerAttributes {
    pub item_seen: bool,
}

impl BannerAttributes {
    pub fn unseen() -> Self {
        Self { item_seen: false }
    }
}

/// 外观属性（皮肤、表情等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CosmeticAttributes {
    pub max_level_bonus: i64,
    pub level: i64,
    pub item_seen: bool,
    pub xp: i64,
    pub variants: Vec<Value>,
    pub favorite: bool,
}

impl Default for CosmeticAttributes {
    /// 新获得外观的默认属性
    fn default() -> Self {
        Self {
            max_level_bonus: 0,
            level: 1,
            item_seen: false,
            xp: 0,
            variants: Vec::new(),
            favorite: false,
        }
    }
}

/// 发放回执（礼盒）属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GiftBoxAttributes {
    pub max_level_bonus: i64,
    #[serde(rename = "fromAccountId")]
    pub from_account_id: String,
    #[serde(rename = "lootList")]
    pub loot_list: Vec<LootManifestEntry>,
}

impl GiftBoxAttributes {
    pub fn new(loot_list: Vec<LootManifestEntry>) -> Self {
        Self {
            max_level_bonus: 0,
            from_account_id: String::new(),
            loot_list,
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("max_level_bonus".to_string(), Value::from(self.max_level_bonus));
        map.insert(
            "fromAccountId".to_string(),
            Value::String(self.from_account_id.clone()),
        );
        let loot: Vec<Value> = self
            .loot_list
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "itemType": entry.item_type,
                    "itemGuid": entry.item_guid,
                    "quantity": entry.quantity,
                })
            })
            .collect();
        map.insert("lootList".to_string(), Value::Array(loot));
        map
    }
}
