//! API Key 认证中间件
//!
//! 运营工具通过查询参数 `apikey` 或 `X-API-Key` 头部传递 API Key，
//! 两者同时存在时以头部为准。

use axum::{
    body::Body,
    extract::{Query, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::state::AppState;

/// API Key Header 名称
pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Deserialize)]
struct ApiKeyParam {
    apikey: Option<String>,
}

/// 计算 API Key 的 SHA256 哈希
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn extract_api_key(request: &Request<Body>) -> Option<String> {
    if let Some(value) = request.headers().get(API_KEY_HEADER) {
        return value.to_str().ok().map(str::to_string);
    }

    Query::<ApiKeyParam>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(param)| param.apikey)
}

/// API Key 认证中间件
///
/// 比较哈希而不是明文；服务未配置 API Key 时拒绝所有请求。
pub async fn api_key_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key_hash.as_deref() else {
        warn!("未配置 API Key，拒绝请求");
        return ServiceError::Unauthorized.into_response();
    };

    let Some(api_key) = extract_api_key(&request).filter(|k| !k.is_empty()) else {
        return ServiceError::Unauthorized.into_response();
    };

    if hash_api_key(&api_key) != expected {
        let key_prefix: String = api_key.chars().take(4).collect();
        warn!(key_prefix = %key_prefix, "Invalid API Key");
        return ServiceError::Unauthorized.into_response();
    }

    debug!("API Key authenticated successfully");
    next.run(request).await
}
