//! Organization Settings API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::activity::{ActivityKind, ActivityRequest};
use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::{OrgSettings, OrgSettingsUpdate};
use crate::utils::AppResult;

/// GET /api/settings - 获取组织设置（不存在则创建默认值）
pub async fn get_settings(State(state): State<ServerState>) -> AppResult<Json<OrgSettings>> {
    let settings = state.settings().get_or_create().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - 合并更新组织设置
pub async fn update_settings(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<OrgSettingsUpdate>,
) -> AppResult<Json<OrgSettings>> {
    payload.validate()?;

    let settings = state.settings().update(payload).await?;

    state.activity.record(
        ActivityRequest::new(ActivityKind::SettingsUpdated)
            .actor(actor.email)
            .subject("org_settings:main", settings.name.clone()),
    );

    Ok(Json(settings))
}
