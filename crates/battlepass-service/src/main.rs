//! 战斗通行证服务
//!
//! 提供运营侧按原因发放通行证等级的 REST API。

use std::sync::Arc;

use anyhow::Context;
use battlepass_service::{
    Account, AppState, BattlePassGrantService, ProfileDocument,
    repository::{FileCatalogLoader, InMemoryAccountRepository, InMemoryProfileRepository},
    routes,
};
use battlepass_shared::{config::AppConfig, observability};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// 开发环境种子数据
#[derive(Debug, Default, Deserialize)]
struct SeedData {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    profiles: Vec<ProfileDocument>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：从 config/{service_name}.toml 加载，包含可观测性配置
    let config = AppConfig::load("battlepass-service").unwrap_or_default();

    let obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    let _guard = observability::init(&obs_config).await?;

    info!(
        season = %config.battlepass.season_name(),
        enabled = config.battlepass.enabled,
        "Starting battlepass-service on {}",
        config.server_addr()
    );

    if config.battlepass.api_key.is_empty() {
        warn!("battlepass.api_key 未配置，发放接口将拒绝所有请求");
    }

    // 初始化仓储
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    if let Ok(path) = std::env::var("BATTLEPASS_SEED_FILE") {
        let seed = load_seed(&path).await?;
        info!(
            path = %path,
            accounts = seed.accounts.len(),
            profiles = seed.profiles.len(),
            "种子数据已加载"
        );
        seed.accounts.into_iter().for_each(|a| accounts.insert(a));
        seed.profiles.into_iter().for_each(|p| profiles.insert(p));
    }
    let catalogs = Arc::new(FileCatalogLoader::new(&config.battlepass.catalog_dir));

    let grant_service = Arc::new(BattlePassGrantService::new(
        accounts,
        profiles,
        catalogs,
        config.battlepass.clone(),
    ));
    if grant_service.cooldown().spawn_pruner().is_some() {
        info!(
            cooldown_secs = config.battlepass.cooldown_secs,
            "冷却记录清理任务已启动"
        );
    }
    let state = AppState::new(grant_service);

    let app = routes::app(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

async fn load_seed(path: &str) -> anyhow::Result<SeedData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("读取种子文件失败: {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("解析种子文件失败: {path}"))
}

/// 监听关闭信号
///
/// 收到 SIGTERM 或 Ctrl+C 后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "注册 Ctrl+C 处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "注册 SIGTERM 处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
