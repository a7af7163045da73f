//! Member API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::header,
    response::IntoResponse,
};

use crate::activity::{ActivityKind, ActivityRequest};
use crate::auth::CurrentActor;
use crate::badge::build_badge_html;
use crate::core::ServerState;
use crate::db::models::{Member, MemberCreate, MemberFilter, MemberStats, MemberUpdate};
use crate::utils::{AppError, AppResult, current_year};

/// GET /api/members - 成员列表（支持搜索和过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<MemberFilter>,
) -> AppResult<Json<Vec<Member>>> {
    let members = state.members().list(filter).await?;
    Ok(Json(members))
}

/// GET /api/members/stats - 仪表盘统计
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<MemberStats>> {
    let stats = state.members().stats().await?;
    Ok(Json(stats))
}

/// GET /api/members/:id - 获取单个成员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Member>> {
    let member = state
        .members()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", id)))?;
    Ok(Json(member))
}

/// POST /api/members - 创建成员
///
/// 先从计数器取号再写入：取号失败则整个创建失败，
/// 不会出现没有编号的成员。
pub async fn create(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Json(payload): Json<MemberCreate>,
) -> AppResult<Json<Member>> {
    payload.validate()?;

    let member_id = state
        .counters()
        .next_member_id(&state.config.org_id_prefix, current_year())
        .await?;
    let member = state.members().create(payload, member_id).await?;

    state.activity.record(
        ActivityRequest::new(ActivityKind::MemberAdded)
            .actor(actor.email)
            .subject(member.member_id.clone(), member.full_name.clone()),
    );

    Ok(Json(member))
}

/// PUT /api/members/:id - 更新成员
pub async fn update(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
    Json(payload): Json<MemberUpdate>,
) -> AppResult<Json<Member>> {
    payload.validate()?;

    let old = state
        .members()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", id)))?;

    let member = state.members().update(&id, payload).await?;

    // Only a status change is feed-worthy; ordinary edits are not
    if member.is_active != old.is_active {
        let kind = if member.is_active {
            ActivityKind::MemberActivated
        } else {
            ActivityKind::MemberDeactivated
        };
        state.activity.record(
            ActivityRequest::new(kind)
                .actor(actor.email)
                .subject(member.member_id.clone(), member.full_name.clone()),
        );
    }

    Ok(Json(member))
}

/// POST /api/members/:id/toggle - 切换启用状态
pub async fn toggle_active(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
) -> AppResult<Json<Member>> {
    let member = state.members().toggle_active(&id).await?;

    let kind = if member.is_active {
        ActivityKind::MemberActivated
    } else {
        ActivityKind::MemberDeactivated
    };
    state.activity.record(
        ActivityRequest::new(kind)
            .actor(actor.email)
            .subject(member.member_id.clone(), member.full_name.clone()),
    );

    Ok(Json(member))
}

/// DELETE /api/members/:id - 删除成员
pub async fn delete(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    // Repo returns the removed record so the event keeps a readable
    // name after the member row is gone
    let deleted = state.members().delete(&id).await?;

    state.activity.record(
        ActivityRequest::new(ActivityKind::MemberDeleted)
            .actor(actor.email)
            .subject(deleted.member_id, deleted.full_name),
    );

    Ok(Json(true))
}

/// GET /api/members/:id/card - 下载证卡 PDF
pub async fn download_card(
    State(state): State<ServerState>,
    Extension(actor): Extension<CurrentActor>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let member = state
        .members()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Member {}", id)))?;
    let settings = state.settings().get_or_create().await?;
    let template = state
        .card_templates()
        .find_active()
        .await?
        .unwrap_or_default();

    let html = build_badge_html(&member, &settings, &template, &state.assets);

    // The driver is synchronous; keep it off the async executor
    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&html))
        .await
        .map_err(|e| AppError::internal(format!("Render task failed: {e}")))?
        .map_err(|e| AppError::render(format!("{e:#}")))?;

    state.activity.record(
        ActivityRequest::new(ActivityKind::CardDownloaded)
            .actor(actor.email)
            .subject(member.member_id.clone(), member.full_name.clone()),
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"id-card-{}.pdf\"", member.member_id),
        ),
    ];
    Ok((headers, pdf))
}
