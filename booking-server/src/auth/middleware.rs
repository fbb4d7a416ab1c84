//! 认证中间件
//!
//! 为会话认证和管理员授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 无需登录即可访问的 API 路径
///
/// 浏览目录和查询空位属于向导的登录前步骤；
/// 认证端点本身必须匿名可达。
fn is_public_api_route(path: &str) -> bool {
    path == "/api/health"
        || path.starts_with("/api/auth/")
        || path.starts_with("/api/admin/auth/")
        || path.starts_with("/api/catalog")
        || path == "/api/bookings/availability"
}

/// 认证中间件 - 要求登录
///
/// 依次尝试 `Authorization: Bearer <token>` 头和 HTTP-only `session`
/// cookie。验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - [`is_public_api_route`] 列出的公共端点
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(path) {
        return Ok(next.run(req).await);
    }

    let bearer = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_header);

    let cookie = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_cookie);

    let token = match bearer.or(cookie) {
        Some(token) => token,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|_| AppError::invalid_token())?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token()),
            }
        }
    }
}

/// 管理员中间件 - 要求管理员角色
///
/// 检查 `CurrentUser.role == "admin"`，非管理员返回 403
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            email = user.email.clone()
        );
        return Err(AppError::forbidden("Administrator role required"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        assert!(is_public_api_route("/api/health"));
        assert!(is_public_api_route("/api/auth/login"));
        assert!(is_public_api_route("/api/admin/auth/login"));
        assert!(is_public_api_route("/api/catalog/venues"));
        assert!(is_public_api_route("/api/bookings/availability"));
    }

    #[test]
    fn protected_routes() {
        assert!(!is_public_api_route("/api/bookings"));
        assert!(!is_public_api_route("/api/bookings/fare"));
        assert!(!is_public_api_route("/api/users/me"));
        assert!(!is_public_api_route("/api/venues"));
        assert!(!is_public_api_route("/api/otp/send"));
    }
}
