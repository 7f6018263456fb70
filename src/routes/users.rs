use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
};
use foodgram_shared::PageArgs;
use foodgram_user::{AvatarInput, RegisterInput, SetPasswordInput, query, query_subscriptions};
use serde::{Deserialize, Serialize};

use super::{
    ApiJson, ApiPath, ApiQuery, AppState,
    view::{Paginated, RegisteredView, SubscriptionView, UserView, media_url},
};
use crate::{
    error::AppResult,
    middleware::{Auth, MaybeAuth},
};

#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub recipes_limit: Option<u64>,
}

impl SubscriptionQuery {
    fn page_args(&self) -> PageArgs {
        PageArgs {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AvatarView {
    pub avatar: String,
}

/// GET /api/users/
pub async fn list(
    State(state): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    OriginalUri(uri): OriginalUri,
    ApiQuery(args): ApiQuery<PageArgs>,
) -> AppResult<Json<Paginated<UserView>>> {
    let mut page = query::query_users(&state.pool, &args).await?;
    let rows = std::mem::take(&mut page.rows);

    let mut results = Vec::with_capacity(rows.len());
    for user in rows {
        results.push(UserView::load(&state, user, viewer).await?);
    }

    Ok(Json(Paginated::new(
        &page,
        results,
        state.config.base_url(),
        &uri,
    )))
}

/// POST /api/users/
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> AppResult<(StatusCode, Json<RegisteredView>)> {
    let id = state.user_command.register(input).await?;
    let user = query::query_user_by_id(&state.user_command.write_db, id).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users/{id}/
pub async fn detail(
    State(state): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<UserView>> {
    let user = query::query_user_by_id(&state.pool, id).await?;

    Ok(Json(UserView::load(&state, user, viewer).await?))
}

/// GET /api/users/me/
pub async fn me(State(state): State<AppState>, Auth(user_id): Auth) -> AppResult<Json<UserView>> {
    let user = query::query_user_by_id(&state.pool, user_id).await?;

    Ok(Json(UserView::load(&state, user, Some(user_id)).await?))
}

/// POST /api/users/set_password/
pub async fn set_password(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiJson(input): ApiJson<SetPasswordInput>,
) -> AppResult<StatusCode> {
    state.user_command.set_password(user_id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/users/me/avatar/
pub async fn set_avatar(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiJson(input): ApiJson<AvatarInput>,
) -> AppResult<Json<AvatarView>> {
    let path = state.user_command.set_avatar(user_id, input).await?;

    Ok(Json(AvatarView {
        avatar: media_url(state.config.base_url(), &path),
    }))
}

/// DELETE /api/users/me/avatar/
pub async fn delete_avatar(
    State(state): State<AppState>,
    Auth(user_id): Auth,
) -> AppResult<StatusCode> {
    state.user_command.delete_avatar(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/subscriptions/
pub async fn subscriptions(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    OriginalUri(uri): OriginalUri,
    ApiQuery(params): ApiQuery<SubscriptionQuery>,
) -> AppResult<Json<Paginated<SubscriptionView>>> {
    let mut page = query_subscriptions(&state.pool, user_id, &params.page_args()).await?;
    let rows = std::mem::take(&mut page.rows);

    let mut results = Vec::with_capacity(rows.len());
    for author in rows {
        results.push(SubscriptionView::load(&state, author, user_id, params.recipes_limit).await?);
    }

    Ok(Json(Paginated::new(
        &page,
        results,
        state.config.base_url(),
        &uri,
    )))
}

/// POST /api/users/{id}/subscribe/
pub async fn subscribe(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<SubscriptionQuery>,
) -> AppResult<(StatusCode, Json<SubscriptionView>)> {
    let author = state.user_command.subscribe(user_id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionView::load(&state, author, user_id, params.recipes_limit).await?),
    ))
}

/// DELETE /api/users/{id}/subscribe/
pub async fn unsubscribe(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.user_command.unsubscribe(user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
