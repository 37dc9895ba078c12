use serde::{Deserialize, Serialize};

/// 玩家账号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub username: String,
    /// 用于查找的规范化用户名（去空白、小写）
    pub username_lower: String,
}

impl Account {
    pub fn new(account_id: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            account_id: account_id.into(),
            username_lower: Self::normalize_username(&username),
            username,
        }
    }

    /// 用户名规范化：去掉首尾空白并转小写
    pub fn normalize_username(username: &str) -> String {
        username.trim().to_lowercase()
    }
}
