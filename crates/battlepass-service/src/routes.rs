//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{Router, middleware, routing::get};
use battlepass_shared::observability::middleware as obs_middleware;

use crate::{handlers, middleware::api_key_auth_middleware, state::AppState};

/// 构建需要 API Key 的运营接口路由
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/reload/bptiers", get(handlers::bptiers::reload_bp_tiers))
        .route_layer(middleware::from_fn_with_state(state, api_key_auth_middleware))
}

/// 构建完整应用
///
/// `/health` 不经过认证；所有请求经过请求 ID 与追踪中间件。
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
