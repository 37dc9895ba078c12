//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::ObservabilityConfig;

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_common_metrics(&config.service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册通用指标
///
/// 描述会出现在 /metrics 端点的 HELP 注释中
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "battlepass_grants_total",
        "Total number of battle pass tier grant operations"
    );
    metrics::describe_counter!(
        "battlepass_tiers_granted_total",
        "Total number of battle pass tiers granted"
    );
    metrics::describe_counter!(
        "battlepass_loot_lines_total",
        "Total number of reward lines recorded in grant manifests"
    );
    metrics::describe_histogram!(
        "battlepass_grant_duration_seconds",
        "Battle pass grant duration in seconds"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 便捷的指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录一次等级发放
///
/// `status` 取值如 "success"、"invalid_request"、"catalog_unavailable"
#[inline]
pub fn record_tier_grant(
    reason: &str,
    status: &str,
    tiers: u64,
    loot_lines: u64,
    duration_secs: f64,
) {
    metrics::counter!(
        "battlepass_grants_total",
        "reason" => reason.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    if tiers > 0 {
        metrics::counter!("battlepass_tiers_granted_total", "reason" => reason.to_string())
            .increment(tiers);
    }
    if loot_lines > 0 {
        metrics::counter!("battlepass_loot_lines_total").increment(loot_lines);
    }

    metrics::histogram!(
        "battlepass_grant_duration_seconds",
        "status" => status.to_string()
    )
    .record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder() {
        // 未安装 recorder 时记录指标应为空操作
        record_http_request("GET", "/api/reload/bptiers", 200, 0.01);
        record_tier_grant("win", "success", 3, 5, 0.002);
        record_tier_grant("win", "invalid_request", 0, 0, 0.0001);
    }
}
