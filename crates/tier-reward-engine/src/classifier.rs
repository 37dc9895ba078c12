//! 物品分类器
//!
//! 根据物品标识文本（忽略大小写）决定奖励的处理策略。
//! 规则按优先级依次匹配，先命中者生效；无法识别的标识归为 `Generic`，
//! 只记录在清单中，不写入任何容器。

use serde::{Deserialize, Serialize};

const SEASON_XP_BOOST: &str = "token:athenaseasonxpboost";
const SEASON_FRIEND_XP_BOOST: &str = "token:athenaseasonfriendxpboost";
const CURRENCY_PREFIX: &str = "currency:mtx";
const BANNER_PREFIX: &str = "homebasebanner";
const COSMETIC_PREFIX: &str = "athena";

/// 奖励处理类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// 对局经验加成
    SeasonXpBoost,
    /// 好友对局经验加成
    SeasonFriendXpBoost,
    /// 货币（V-Bucks）
    Currency,
    /// 主页旗帜
    Banner,
    /// 外观物品
    Cosmetic,
    /// 其他，仅记录
    Generic,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 6] = [
        Self::SeasonXpBoost,
        Self::SeasonFriendXpBoost,
        Self::Currency,
        Self::Banner,
        Self::Cosmetic,
        Self::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SeasonXpBoost => "season_xp_boost",
            Self::SeasonFriendXpBoost => "season_friend_xp_boost",
            Self::Currency => "currency",
            Self::Banner => "banner",
            Self::Cosmetic => "cosmetic",
            Self::Generic => "generic",
        }
    }
}

/// 对物品标识分类
pub fn classify(identifier: &str) -> ItemCategory {
    let id = identifier.to_lowercase();

    if id == SEASON_XP_BOOST {
        ItemCategory::SeasonXpBoost
    } else if id == SEASON_FRIEND_XP_BOOST {
        ItemCategory::SeasonFriendXpBoost
    } else if id.starts_with(CURRENCY_PREFIX) {
        ItemCategory::Currency
    } else if id.starts_with(BANNER_PREFIX) {
        ItemCategory::Banner
    } else if id.starts_with(COSMETIC_PREFIX) {
        ItemCategory::Cosmetic
    } else {
        ItemCategory::Generic
    }
}

/// 货币条目判定（钱包扫描时使用）
pub(crate) fn is_currency_template(template_id: &str) -> bool {
    template_id.to_lowercase().starts_with(CURRENCY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_boost_exact_match() {
        assert_eq!(classify("Token:AthenaSeasonXpBoost"), ItemCategory::SeasonXpBoost);
        assert_eq!(classify("TOKEN:ATHENASEASONXPBOOST"), ItemCategory::SeasonXpBoost);
        assert_eq!(
            classify("Token:AthenaSeasonFriendXpBoost"),
            ItemCategory::SeasonFriendXpBoost
        );
        // 仅前缀相同不算命中
        assert_eq!(classify("Token:AthenaSeasonXpBoost2"), ItemCategory::Generic);
    }

    #[test]
    fn test_prefix_matches() {
        assert_eq!(classify("Currency:MtxGiveaway"), ItemCategory::Currency);
        assert_eq!(classify("currency:mtxpurchased"), ItemCategory::Currency);
        assert_eq!(classify("HomebaseBannerIcon:BRS9Level100"), ItemCategory::Banner);
        assert_eq!(classify("HomebaseBannerColor:DefaultColor1"), ItemCategory::Banner);
        assert_eq!(classify("AthenaCharacter:CID_001"), ItemCategory::Cosmetic);
        assert_eq!(classify("Athena:Skin1"), ItemCategory::Cosmetic);
    }

    #[test]
    fn test_unrecognized_is_generic() {
        assert_eq!(classify("Token:BookXpBoost"), ItemCategory::Generic);
        assert_eq!(classify("AccountResource:AthenaSeasonalXP"), ItemCategory::Generic);
        assert_eq!(classify(""), ItemCategory::Generic);
    }

    #[test]
    fn test_precedence_token_before_prefix_rules() {
        // "token:athena..." 不会落入外观前缀，外观规则只看 "athena" 开头
        assert_eq!(classify("Token:AthenaSeasonXpBoost"), ItemCategory::SeasonXpBoost);
        assert_eq!(classify("AthenaSeasonXpBoost"), ItemCategory::Cosmetic);
    }

    #[test]
    fn test_is_currency_template() {
        assert!(is_currency_template("Currency:MtxPurchased"));
        assert!(!is_currency_template("Currency:Gold"));
    }
}
