use foodgram_db::table::{Favorite, Recipe, RecipeTag, ShopCard, Tag as TagTable};
use foodgram_shared::{Error, Page, PageArgs, Result};
use sea_query::{Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use crate::{Collection, Tag};

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub short_link: Option<String>,
}

/// Compact form used by favorite/cart responses and subscriptions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeShort {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RecipeIngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: RecipeRow,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredientRow>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    /// Tag slugs, any-of.
    pub tags: Vec<String>,
    pub author: Option<i64>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    /// Favorite/cart filters only apply when a viewer is known.
    pub viewer: Option<i64>,
}

fn apply_filter(statement: &mut SelectStatement, filter: &RecipeFilter) {
    if !filter.tags.is_empty() {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                Query::select()
                    .column(RecipeTag::RecipeId)
                    .from(RecipeTag::Table)
                    .and_where(
                        Expr::col(RecipeTag::TagId).in_subquery(
                            Query::select()
                                .column(TagTable::Id)
                                .from(TagTable::Table)
                                .and_where(Expr::col(TagTable::Slug).is_in(filter.tags.clone()))
                                .to_owned(),
                        ),
                    )
                    .to_owned(),
            ),
        );
    }

    if let Some(author) = filter.author {
        statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
    }

    let Some(viewer) = filter.viewer else {
        return;
    };

    if filter.is_favorited {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                Query::select()
                    .column(Favorite::RecipeId)
                    .from(Favorite::Table)
                    .and_where(Expr::col(Favorite::UserId).eq(viewer))
                    .to_owned(),
            ),
        );
    }

    if filter.is_in_shopping_cart {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                Query::select()
                    .column(ShopCard::RecipeId)
                    .from(ShopCard::Table)
                    .and_where(Expr::col(ShopCard::UserId).eq(viewer))
                    .to_owned(),
            ),
        );
    }
}

/// Newest recipes first.
pub async fn query_recipes(
    pool: &sqlx::SqlitePool,
    filter: &RecipeFilter,
    args: &PageArgs,
) -> Result<Page<RecipeDetail>> {
    let mut count = Query::select()
        .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))))
        .from(Recipe::Table)
        .to_owned();
    apply_filter(&mut count, filter);

    let (sql, values) = count.build_sqlx(SqliteQueryBuilder);
    let (total,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    args.check(total)?;

    let mut statement = Query::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::Text),
            (Recipe::Table, Recipe::CookingTime),
            (Recipe::Table, Recipe::ShortLink),
        ])
        .from(Recipe::Table)
        .order_by((Recipe::Table, Recipe::Id), Order::Desc)
        .limit(args.limit())
        .offset(args.offset())
        .to_owned();
    apply_filter(&mut statement, filter);

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut details = Vec::with_capacity(rows.len());
    for row in rows {
        details.push(load_detail(pool, row, filter.viewer).await?);
    }

    Ok(Page::new(details, total, args))
}

pub async fn query_recipe_by_id(pool: &sqlx::SqlitePool, id: i64) -> Result<RecipeRow> {
    sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT id, author_id, name, image, text, cooking_time, short_link
        FROM recipe
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(Error::NotFound)
}

pub async fn query_recipe_by_short_link(
    pool: &sqlx::SqlitePool,
    short_link: &str,
) -> Result<RecipeRow> {
    sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT id, author_id, name, image, text, cooking_time, short_link
        FROM recipe
        WHERE short_link = ?1
        "#,
    )
    .bind(short_link)
    .fetch_optional(pool)
    .await?
    .ok_or(Error::NotFound)
}

pub async fn query_recipe_detail(
    pool: &sqlx::SqlitePool,
    id: i64,
    viewer: Option<i64>,
) -> Result<RecipeDetail> {
    let row = query_recipe_by_id(pool, id).await?;

    load_detail(pool, row, viewer).await
}

pub async fn query_recipe_short(pool: &sqlx::SqlitePool, id: i64) -> Result<RecipeShort> {
    sqlx::query_as::<_, RecipeShort>(
        "SELECT id, name, image, cooking_time FROM recipe WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(Error::NotFound)
}

/// Author's recipes, newest first, at most `limit` of them.
pub async fn query_recipes_by_author(
    pool: &sqlx::SqlitePool,
    author_id: i64,
    limit: Option<u64>,
) -> Result<Vec<RecipeShort>> {
    // LIMIT -1 means no limit in sqlite
    let limit = limit.map(|l| l as i64).unwrap_or(-1);

    Ok(sqlx::query_as::<_, RecipeShort>(
        r#"
        SELECT id, name, image, cooking_time
        FROM recipe
        WHERE author_id = ?1
        ORDER BY id DESC
        LIMIT ?2
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .fetch_all(pool)
    .await?)
}

pub async fn count_recipes_by_author(pool: &sqlx::SqlitePool, author_id: i64) -> Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM recipe WHERE author_id = ?1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn query_recipe_tags(pool: &sqlx::SqlitePool, recipe_id: i64) -> Result<Vec<Tag>> {
    Ok(sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.slug
        FROM recipe_tag rt
        JOIN tag t ON t.id = rt.tag_id
        WHERE rt.recipe_id = ?1
        ORDER BY t.id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?)
}

pub async fn query_recipe_ingredients(
    pool: &sqlx::SqlitePool,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredientRow>> {
    Ok(sqlx::query_as::<_, RecipeIngredientRow>(
        r#"
        SELECT i.id, i.name, i.measurement_unit, ri.amount
        FROM recipe_ingredient ri
        JOIN ingredient i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?1
        ORDER BY ri.id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?)
}

async fn load_detail(
    pool: &sqlx::SqlitePool,
    recipe: RecipeRow,
    viewer: Option<i64>,
) -> Result<RecipeDetail> {
    let tags = query_recipe_tags(pool, recipe.id).await?;
    let ingredients = query_recipe_ingredients(pool, recipe.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(user_id) => (
            crate::contains(pool, Collection::Favorite, recipe.id, user_id).await?,
            crate::contains(pool, Collection::ShoppingCart, recipe.id, user_id).await?,
        ),
        None => (false, false),
    };

    Ok(RecipeDetail {
        recipe,
        tags,
        ingredients,
        is_favorited,
        is_in_shopping_cart,
    })
}
