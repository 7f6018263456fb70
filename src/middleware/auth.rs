use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use foodgram_shared::Error;
use foodgram_user::jwt::validate_jwt;

use crate::{error::AppError, routes::AppState};

#[derive(Clone, Copy, Debug)]
struct CurrentUser(i64);

/// Authenticated user id. Rejects with 401 when the request is anonymous.
#[derive(Clone, Copy, Debug)]
pub struct Auth(pub i64);

/// User id when the request carries a valid token.
#[derive(Clone, Copy, Debug)]
pub struct MaybeAuth(pub Option<i64>);

impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|user| Auth(user.0))
            .ok_or(AppError::Domain(Error::Unauthorized))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(
            parts.extensions.get::<CurrentUser>().map(|user| user.0),
        ))
    }
}

/// `Token <jwt>` or `Bearer <jwt>`.
fn token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        Some(token.trim())
    } else {
        None
    }
}

fn unauthorized(detail: &str) -> Response {
    (
        axum::http::StatusCode::UNAUTHORIZED,
        axum::Json(serde_json::json!({ "detail": detail })),
    )
        .into_response()
}

/// Resolves the Authorization header to a user
///
/// Requests without the header pass through anonymously. Any header that
/// does not resolve to a current user gets a 401, including tokens revoked
/// by logout or a password change.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(header) = req.headers().get(AUTHORIZATION) else {
        return next.run(req).await;
    };

    let Some(token) = header.to_str().ok().and_then(token) else {
        return unauthorized("Invalid token header.");
    };

    let claims = match validate_jwt(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Invalid JWT token: {e:?}");
            return unauthorized("Invalid token.");
        }
    };
    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid JWT token: {e:?}");
            return unauthorized("Invalid token.");
        }
    };

    match foodgram_user::query::query_user_by_id(&state.pool, user_id).await {
        Ok(user) if user.token_version == claims.ver => {
            req.extensions_mut().insert(CurrentUser(user_id));
            next.run(req).await
        }
        Ok(_) => {
            tracing::warn!(user_id, "revoked token");
            unauthorized("Invalid token.")
        }
        Err(Error::NotFound) => {
            tracing::warn!(user_id, "token for unknown user");
            unauthorized("Invalid token.")
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
