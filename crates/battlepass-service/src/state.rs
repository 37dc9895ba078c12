//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::middleware::hash_api_key;
use crate::service::BattlePassGrantService;

/// Axum 应用共享状态
///
/// 发放服务通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub grant_service: Arc<BattlePassGrantService>,
    /// 配置中 API Key 的 SHA256 哈希，未配置时为 None（拒绝所有请求）
    pub api_key_hash: Option<Arc<str>>,
}

impl AppState {
    /// 创建新的应用状态，API Key 取自服务配置
    pub fn new(grant_service: Arc<BattlePassGrantService>) -> Self {
        let api_key = &grant_service.config().api_key;
        let api_key_hash = (!api_key.is_empty()).then(|| Arc::from(hash_api_key(api_key)));
        Self {
            grant_service,
            api_key_hash,
        }
    }
}
