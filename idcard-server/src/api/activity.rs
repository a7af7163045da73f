//! Activity Feed API
//!
//! 仪表盘动态流，只读。

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::activity::ActivityEvent;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/activity", get(list))
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// GET /api/activity?limit=N - 最近活动，时间倒序
async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityEvent>>> {
    let events = state
        .activity
        .list_recent(query.limit)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(events))
}
