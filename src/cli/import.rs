use std::path::Path;

use anyhow::{Context, Result};
use foodgram_recipe::{ingredient, tag};
use serde::de::DeserializeOwned;

use crate::Config;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_slice(&data).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Loads `[{"name": "..", "measurement_unit": ".."}]`, skipping known names.
#[tracing::instrument(skip(config))]
pub async fn import_ingredients(config: &Config, path: &Path) -> Result<u64> {
    let items = read_json::<ingredient::IngredientInput>(path).await?;
    let total = items.len();

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let inserted = ingredient::import_ingredients(&pool, items).await?;

    tracing::info!(total, inserted, "ingredients imported");

    Ok(inserted)
}

/// Loads `[{"name": "..", "slug": ".."}]`, skipping known slugs.
#[tracing::instrument(skip(config))]
pub async fn import_tags(config: &Config, path: &Path) -> Result<u64> {
    let items = read_json::<tag::TagInput>(path).await?;
    let total = items.len();

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let inserted = tag::import_tags(&pool, items).await?;

    tracing::info!(total, inserted, "tags imported");

    Ok(inserted)
}
