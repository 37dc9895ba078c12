//! 通行证等级发放 API 处理器
//!
//! 运营工具按「发放原因」为玩家增加通行证等级，等级数由配置决定。

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::{
    dto::{BpTiersQuery, BpTiersResponse},
    error::ServiceError,
    state::AppState,
};

/// 按原因增加通行证等级
///
/// GET /api/reload/bptiers?apikey=&username=&reason=
#[instrument(skip(state, query), fields(username = ?query.username, reason = ?query.reason))]
pub async fn reload_bp_tiers(
    State(state): State<AppState>,
    Query(query): Query<BpTiersQuery>,
) -> Result<Json<BpTiersResponse>, ServiceError> {
    let (username, reason) = query.into_parts()?;

    let receipt = state.grant_service.grant_tiers(&username, &reason).await?;

    Ok(Json(receipt.into()))
}
