use axum::{Json, extract::State};
use foodgram_recipe::{Tag, tag};

use super::{ApiPath, AppState};
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(tag::query_tags(&state.pool).await?))
}

pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Tag>> {
    Ok(Json(tag::query_tag_by_id(&state.pool, id).await?))
}
