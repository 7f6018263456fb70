use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use foodgram_recipe::{LocalShortener, query, short_link::canonical_url};

use super::{ApiPath, AppState};
use crate::error::AppResult;

/// GET /s/{code} - sends the visitor to the recipe page.
pub async fn redirect(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> AppResult<Response> {
    let base_url = state.config.base_url();
    let link = LocalShortener::new(base_url).url(&code);
    let recipe = query::query_recipe_by_short_link(&state.pool, &link).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, canonical_url(base_url, recipe.id))],
    )
        .into_response())
}
