//! 操作者身份
//!
//! 认证在部署边界完成：上游代理校验 Firebase 令牌和邮箱白名单，
//! 放行的请求带上已验证邮箱头。本模块只把它提取成请求扩展，
//! 核心逻辑将 actor 视为可选的不透明字符串。

use axum::{extract::Request, middleware::Next, response::Response};

/// 上游代理写入的已验证邮箱头
pub const VERIFIED_EMAIL_HEADER: &str = "x-verified-email";

/// 当前操作者（活动日志使用）
#[derive(Debug, Clone)]
pub struct CurrentActor {
    /// 已验证的邮箱，匿名请求为 None
    pub email: Option<String>,
}

/// Middleware: extract the verified actor email into a request extension
pub async fn actor_context(mut req: Request, next: Next) -> Response {
    let email = req
        .headers()
        .get(VERIFIED_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    req.extensions_mut().insert(CurrentActor { email });
    next.run(req).await
}
