use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use foodgram_recipe::{Collection, CreateInput, RecipeFilter, UpdateInput, query};
use foodgram_shared::PageArgs;
use serde::Deserialize;
use serde_json::json;

use super::{
    ApiJson, ApiPath, ApiQuery, AppState,
    view::{Paginated, RecipeShortView, RecipeView},
};
use crate::{
    error::AppResult,
    middleware::{Auth, MaybeAuth},
};

#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<i64>,
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

/// GET /api/recipes/
pub async fn list(
    State(state): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    OriginalUri(uri): OriginalUri,
    ApiQuery(params): ApiQuery<RecipeListQuery>,
) -> AppResult<Json<Paginated<RecipeView>>> {
    let args = PageArgs {
        page: params.page,
        limit: params.limit,
    };
    let filter = RecipeFilter {
        tags: params.tags,
        author: params.author,
        is_favorited: params.is_favorited == Some(1),
        is_in_shopping_cart: params.is_in_shopping_cart == Some(1),
        viewer,
    };

    let mut page = query::query_recipes(&state.pool, &filter, &args).await?;
    let rows = std::mem::take(&mut page.rows);

    let mut results = Vec::with_capacity(rows.len());
    for detail in rows {
        results.push(RecipeView::load(&state, detail, viewer).await?);
    }

    Ok(Json(Paginated::new(
        &page,
        results,
        state.config.base_url(),
        &uri,
    )))
}

/// GET /api/recipes/{id}/
pub async fn detail(
    State(state): State<AppState>,
    MaybeAuth(viewer): MaybeAuth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<RecipeView>> {
    let detail = query::query_recipe_detail(&state.pool, id, viewer).await?;

    Ok(Json(RecipeView::load(&state, detail, viewer).await?))
}

/// POST /api/recipes/
#[tracing::instrument(skip_all, fields(user_id = user_id))]
pub async fn create(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiJson(input): ApiJson<CreateInput>,
) -> AppResult<(StatusCode, Json<RecipeView>)> {
    let id = state.recipe_command.create(user_id, input).await?;
    let detail = query::query_recipe_detail(&state.recipe_command.write_db, id, Some(user_id)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeView::load(&state, detail, Some(user_id)).await?),
    ))
}

/// PATCH /api/recipes/{id}/
#[tracing::instrument(skip_all, fields(user_id = user_id, recipe_id = id))]
pub async fn update(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateInput>,
) -> AppResult<Json<RecipeView>> {
    state.recipe_command.update(id, user_id, input).await?;
    let detail = query::query_recipe_detail(&state.recipe_command.write_db, id, Some(user_id)).await?;

    Ok(Json(RecipeView::load(&state, detail, Some(user_id)).await?))
}

/// DELETE /api/recipes/{id}/
pub async fn delete(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.recipe_command.delete(id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn add(
    state: AppState,
    collection: Collection,
    id: i64,
    user_id: i64,
) -> AppResult<(StatusCode, Json<RecipeShortView>)> {
    let recipe = state.recipe_command.add(collection, id, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeShortView::new(state.config.base_url(), recipe)),
    ))
}

/// POST /api/recipes/{id}/favorite/
pub async fn add_favorite(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<(StatusCode, Json<RecipeShortView>)> {
    add(state, Collection::Favorite, id, user_id).await
}

/// DELETE /api/recipes/{id}/favorite/
pub async fn remove_favorite(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state
        .recipe_command
        .remove(Collection::Favorite, id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/recipes/{id}/shopping_cart/
pub async fn add_to_cart(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<(StatusCode, Json<RecipeShortView>)> {
    add(state, Collection::ShoppingCart, id, user_id).await
}

/// DELETE /api/recipes/{id}/shopping_cart/
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Auth(user_id): Auth,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state
        .recipe_command
        .remove(Collection::ShoppingCart, id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/download_shopping_cart/
#[tracing::instrument(skip_all, fields(user_id = user_id))]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    Auth(user_id): Auth,
) -> AppResult<Response> {
    if foodgram_shopping::is_cart_empty(&state.pool, user_id).await? {
        return Ok(Json(json!({ "detail": "Shopping cart is empty" })).into_response());
    }

    let items = foodgram_shopping::query_shopping_list(&state.pool, user_id).await?;
    let pdf = tokio::task::spawn_blocking(move || foodgram_shopping::pdf::render(&items))
        .await
        .map_err(anyhow::Error::from)??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_cart.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response())
}

/// GET /api/recipes/{id}/get-link/
pub async fn get_link(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let link = state
        .recipe_command
        .short_link(id, state.config.base_url(), state.shortener.as_ref())
        .await?;

    Ok(Json(json!({ "short-link": link })))
}
