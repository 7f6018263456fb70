use foodgram_db::table::{Subscribe, User};
use foodgram_shared::{Error, Page, PageArgs, Result};
use sea_query::{Expr, ExprTrait, Func, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub avatar: Option<String>,
    /// Bumped on logout and password change, tokens carry the value they
    /// were issued with.
    pub token_version: i64,
}

const COLUMNS: [User; 8] = [
    User::Id,
    User::Email,
    User::Username,
    User::FirstName,
    User::LastName,
    User::Password,
    User::Avatar,
    User::TokenVersion,
];

pub async fn query_user_by_id(pool: &sqlx::SqlitePool, id: i64) -> Result<UserRow> {
    let statement = Query::select()
        .columns(COLUMNS)
        .from(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?
        .ok_or(Error::NotFound)
}

/// Emails compare case-insensitively.
pub async fn find_user_by_email(pool: &sqlx::SqlitePool, email: &str) -> Result<Option<UserRow>> {
    Ok(sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, username, first_name, last_name, password, avatar, token_version
        FROM user
        WHERE email = ?1 COLLATE NOCASE
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?)
}

pub async fn exists_username(pool: &sqlx::SqlitePool, username: &str) -> Result<bool> {
    let (exists,) = sqlx::query_as::<_, (bool,)>(
        "SELECT EXISTS(SELECT 1 FROM user WHERE username = ?1 COLLATE NOCASE)",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// All users by id.
pub async fn query_users(pool: &sqlx::SqlitePool, args: &PageArgs) -> Result<Page<UserRow>> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await?;

    args.check(count)?;

    let statement = Query::select()
        .columns(COLUMNS)
        .from(User::Table)
        .order_by(User::Id, Order::Asc)
        .limit(args.limit())
        .offset(args.offset())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(Page::new(rows, count, args))
}

pub async fn is_subscribed(pool: &sqlx::SqlitePool, user_id: i64, author_id: i64) -> Result<bool> {
    let statement = Query::select()
        .expr(Func::count(Expr::col(Subscribe::Id)))
        .from(Subscribe::Table)
        .and_where(Expr::col(Subscribe::UserId).eq(user_id))
        .and_where(Expr::col(Subscribe::AuthorId).eq(author_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}
