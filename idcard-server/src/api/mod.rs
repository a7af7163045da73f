//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`members`] - 成员管理接口（含证卡下载）
//! - [`settings`] - 组织设置接口
//! - [`templates`] - 证卡模板接口
//! - [`activity`] - 活动日志接口

pub mod activity;
pub mod health;
pub mod members;
pub mod settings;
pub mod templates;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(members::router())
        .merge(settings::router())
        .merge(templates::router())
        .merge(activity::router())
        .merge(health::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Actor context - injects CurrentActor from the auth proxy header
        .layer(axum_middleware::from_fn(auth::actor_context))
        .with_state(state)
}
