use axum::{Json, extract::State};
use foodgram_recipe::{Ingredient, ingredient};
use serde::Deserialize;

use super::{ApiPath, ApiQuery, AppState};
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct IngredientQuery {
    pub name: Option<String>,
}

/// `?name=` matches a case-insensitive prefix.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IngredientQuery>,
) -> AppResult<Json<Vec<Ingredient>>> {
    Ok(Json(
        ingredient::query_ingredients(&state.pool, query.name.as_deref()).await?,
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Ingredient>> {
    Ok(Json(ingredient::query_ingredient_by_id(&state.pool, id).await?))
}
