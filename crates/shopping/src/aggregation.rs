use foodgram_shared::Result;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Sums ingredient amounts over every recipe in the user's cart, one row per
/// (name, unit), in order of first appearance.
#[tracing::instrument(skip(pool))]
pub async fn query_shopping_list(pool: &sqlx::SqlitePool, user_id: i64) -> Result<Vec<ShoppingItem>> {
    Ok(sqlx::query_as::<_, ShoppingItem>(
        r#"
        SELECT i.name, i.measurement_unit, SUM(ri.amount) AS amount
        FROM shop_card sc
        JOIN recipe_ingredient ri ON ri.recipe_id = sc.recipe_id
        JOIN ingredient i ON i.id = ri.ingredient_id
        WHERE sc.user_id = ?1
        GROUP BY i.name, i.measurement_unit
        ORDER BY MIN(ri.id)
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn is_cart_empty(pool: &sqlx::SqlitePool, user_id: i64) -> Result<bool> {
    let (exists,) =
        sqlx::query_as::<_, (bool,)>("SELECT EXISTS(SELECT 1 FROM shop_card WHERE user_id = ?1)")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(!exists)
}
