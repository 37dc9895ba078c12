use axum::Json;

use crate::dto::HealthResponse;

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "battlepass-service",
    })
}
