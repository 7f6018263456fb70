use axum::{Json, extract::State, http::StatusCode};
use foodgram_user::{LoginInput, jwt};
use serde::Serialize;

use super::{ApiJson, AppState};
use crate::{error::AppResult, middleware::Auth};

#[derive(Debug, Serialize)]
pub struct TokenView {
    pub auth_token: String,
}

/// POST /api/auth/token/login/
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> AppResult<Json<TokenView>> {
    let user = state.user_command.login(input).await?;
    let auth_token = jwt::generate_jwt(
        user.id,
        user.token_version,
        &state.config.jwt.secret,
        state.config.jwt.expiration_days,
    )?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(TokenView { auth_token }))
}

/// POST /api/auth/token/logout/ - invalidates every token of the user.
pub async fn logout(
    State(state): State<AppState>,
    Auth(user_id): Auth,
) -> AppResult<StatusCode> {
    state.user_command.logout(user_id).await?;

    tracing::info!(user_id, "user logged out");

    Ok(StatusCode::NO_CONTENT)
}
