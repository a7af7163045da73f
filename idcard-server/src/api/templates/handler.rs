//! Card Template API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::activity::{ActivityKind, ActivityRequest};
use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::{CardTemplate, CardTemplateCreate, CardTemplateUpdate};
use crate::utils::AppResult;

fn record_change(state: &ServerState, actor: Option<String>, template: &CardTemplate) {
    let id = template
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    state.activity.record(
        ActivityRequest::new(ActivityKind::TemplateChanged)
            .actor(actor)
            .subject(id, template.name.clone()),
    );
}

/// GET /api/templates - 模板列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CardTemplate>>> {
    let templates = state.card_templates().list().await?;
    Ok(Json(templates))
}

/// POST /api/templates - 创建模板
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<CardTemplateCreate>,
) -> AppResult<Json<CardTemplate>> {
    payload.validate()?;

    let template = state.card_templates().create(payload).await?;
    record_change(&state, actor.email, &template);
    Ok(Json(template))
}

/// PUT /api/templates/:id - 更新模板
pub async fn update(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
    Json(payload): Json<CardTemplateUpdate>,
) -> AppResult<Json<CardTemplate>> {
    payload.validate()?;

    let template = state.card_templates().update(&id, payload).await?;
    record_change(&state, actor.email, &template);
    Ok(Json(template))
}

/// DELETE /api/templates/:id - 删除模板
pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = state.card_templates().delete(&id).await?;
    record_change(&state, actor.email, &deleted);
    Ok(Json(true))
}

/// POST /api/templates/:id/activate - 激活模板（互斥）
pub async fn activate(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
) -> AppResult<Json<CardTemplate>> {
    let template = state.card_templates().set_active(&id).await?;
    record_change(&state, actor.email, &template);
    Ok(Json(template))
}
