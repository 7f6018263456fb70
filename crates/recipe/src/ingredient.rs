use foodgram_db::table;
use foodgram_shared::{Error, Result};
use sea_query::{
    Cond, Expr, ExprTrait, Func, LikeExpr, OnConflict, Order, Query, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub measurement_unit: String,
}

/// Ingredients ordered by name, optionally restricted to names starting with
/// `name` (case-insensitive).
pub async fn query_ingredients(
    pool: &sqlx::SqlitePool,
    name: Option<&str>,
) -> Result<Vec<Ingredient>> {
    let mut statement = Query::select()
        .columns([
            table::Ingredient::Id,
            table::Ingredient::Name,
            table::Ingredient::MeasurementUnit,
        ])
        .from(table::Ingredient::Table)
        .order_by(table::Ingredient::Name, Order::Asc)
        .order_by(table::Ingredient::Id, Order::Asc)
        .to_owned();

    let prefix = name
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase);

    // SQLite LIKE folds ASCII only, narrow on the first letter and fold the
    // rest here
    if let Some(first) = prefix.as_deref().and_then(|p| p.chars().next()) {
        let mut cond = Cond::any();
        for variant in first_letter_variants(first) {
            cond = cond.add(
                Expr::col(table::Ingredient::Name)
                    .like(LikeExpr::new(format!("{}%", escape_like(&variant))).escape('\\')),
            );
        }
        statement.cond_where(cond);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let ingredients = sqlx::query_as_with::<_, Ingredient, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let Some(prefix) = prefix else {
        return Ok(ingredients);
    };

    Ok(ingredients
        .into_iter()
        .filter(|i| i.name.to_lowercase().starts_with(&prefix))
        .collect())
}

fn first_letter_variants(letter: char) -> Vec<String> {
    let mut variants = vec![
        letter.to_lowercase().collect::<String>(),
        letter.to_uppercase().collect::<String>(),
    ];
    variants.dedup();

    variants
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

pub async fn query_ingredient_by_id(pool: &sqlx::SqlitePool, id: i64) -> Result<Ingredient> {
    sqlx::query_as::<_, Ingredient>(
        "SELECT id, name, measurement_unit FROM ingredient WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(Error::NotFound)
}

pub(crate) async fn count_existing(pool: &sqlx::SqlitePool, ids: &[i64]) -> Result<i64> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(table::Ingredient::Id)))
        .from(table::Ingredient::Table)
        .and_where(Expr::col(table::Ingredient::Id).is_in(ids.iter().copied()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Inserts ingredients, skipping names that already exist.
pub async fn import_ingredients(
    pool: &sqlx::SqlitePool,
    ingredients: Vec<IngredientInput>,
) -> Result<u64> {
    let mut inserted = 0;

    // sqlite caps bound parameters per statement
    for chunk in ingredients.chunks(400) {
        let mut statement = Query::insert()
            .into_table(table::Ingredient::Table)
            .columns([table::Ingredient::Name, table::Ingredient::MeasurementUnit])
            .to_owned();

        for ingredient in chunk {
            ingredient.validate()?;
            statement.values_panic([
                ingredient.name.to_owned().into(),
                ingredient.measurement_unit.to_owned().into(),
            ]);
        }

        statement.on_conflict(
            OnConflict::column(table::Ingredient::Name)
                .do_nothing()
                .to_owned(),
        );

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        inserted += sqlx::query_with(&sql, values)
            .execute(pool)
            .await?
            .rows_affected();
    }

    Ok(inserted)
}
