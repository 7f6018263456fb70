use std::sync::LazyLock;

use foodgram_db::table;
use foodgram_shared::{Error, Result};
use regex::Regex;
use sea_query::{Expr, ExprTrait, Func, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("valid slug regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    #[validate(length(min = 1, max = 32), regex(path = *SLUG))]
    pub slug: String,
}

pub async fn query_tags(pool: &sqlx::SqlitePool) -> Result<Vec<Tag>> {
    Ok(
        sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tag ORDER BY id")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn query_tag_by_id(pool: &sqlx::SqlitePool, id: i64) -> Result<Tag> {
    sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tag WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound)
}

/// Number of distinct ids from `ids` that exist.
pub(crate) async fn count_existing(pool: &sqlx::SqlitePool, ids: &[i64]) -> Result<i64> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(table::Tag::Id)))
        .from(table::Tag::Table)
        .and_where(Expr::col(table::Tag::Id).is_in(ids.iter().copied()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Inserts tags, skipping slugs that already exist. Returns the number of
/// new rows.
pub async fn import_tags(pool: &sqlx::SqlitePool, tags: Vec<TagInput>) -> Result<u64> {
    if tags.is_empty() {
        return Ok(0);
    }

    let mut statement = Query::insert()
        .into_table(table::Tag::Table)
        .columns([table::Tag::Name, table::Tag::Slug])
        .to_owned();

    for tag in tags {
        tag.validate()?;
        statement.values_panic([tag.name.into(), tag.slug.into()]);
    }

    statement.on_conflict(
        OnConflict::column(table::Tag::Slug)
            .do_nothing()
            .to_owned(),
    );

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}
