use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use temp_dir::TempDir;

async fn setup(dir: &TempDir) -> anyhow::Result<SqlitePool> {
    let url = format!("sqlite:{}", dir.child("db.sqlite3").display());
    let options = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    foodgram_db::migrate(&pool).await?;

    Ok(pool)
}

async fn seed(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO "user" (id, email, username, first_name, last_name, password)
        VALUES (1, 'john@foodgram.test', 'john', 'John', 'Doe', 'x'),
               (2, 'jane@foodgram.test', 'jane', 'Jane', 'Doe', 'x')
        "#,
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "INSERT INTO recipe (id, author_id, name, image, text, cooking_time) VALUES (1, 1, 'Soup', 'a.png', 'Boil.', 10)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn count(pool: &SqlitePool, table: &str) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[tokio::test]
async fn test_migrate_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;

    foodgram_db::migrate(&pool).await?;

    for table in [
        "\"user\"",
        "tag",
        "ingredient",
        "recipe",
        "recipe_tag",
        "recipe_ingredient",
        "favorite",
        "shop_card",
        "subscribe",
    ] {
        assert_eq!(count(&pool, table).await?, 0, "{table}");
    }

    Ok(())
}

#[tokio::test]
async fn test_unique_constraints() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;
    seed(&pool).await?;

    let duplicate_email = sqlx::query(
        r#"
        INSERT INTO "user" (email, username, first_name, last_name, password)
        VALUES ('JOHN@foodgram.test', 'other', 'John', 'Doe', 'x')
        "#,
    )
    .execute(&pool)
    .await;
    assert!(duplicate_email.is_err());

    sqlx::query("INSERT INTO favorite (user_id, recipe_id) VALUES (2, 1)")
        .execute(&pool)
        .await?;
    let duplicate_favorite = sqlx::query("INSERT INTO favorite (user_id, recipe_id) VALUES (2, 1)")
        .execute(&pool)
        .await;
    assert!(duplicate_favorite.is_err());

    sqlx::query("INSERT INTO tag (name, slug) VALUES ('Lunch', 'lunch')")
        .execute(&pool)
        .await?;
    let duplicate_slug = sqlx::query("INSERT INTO tag (name, slug) VALUES ('Other', 'lunch')")
        .execute(&pool)
        .await;
    assert!(duplicate_slug.is_err());

    Ok(())
}

#[tokio::test]
async fn test_deleting_user_cascades() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;
    seed(&pool).await?;

    sqlx::query("INSERT INTO ingredient (id, name, measurement_unit) VALUES (1, 'salt', 'g')")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES (1, 1, 5)")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO shop_card (user_id, recipe_id) VALUES (2, 1)")
        .execute(&pool)
        .await?;
    sqlx::query("INSERT INTO subscribe (user_id, author_id) VALUES (2, 1)")
        .execute(&pool)
        .await?;

    sqlx::query(r#"DELETE FROM "user" WHERE id = 1"#)
        .execute(&pool)
        .await?;

    assert_eq!(count(&pool, "recipe").await?, 0);
    assert_eq!(count(&pool, "recipe_ingredient").await?, 0);
    assert_eq!(count(&pool, "shop_card").await?, 0);
    assert_eq!(count(&pool, "subscribe").await?, 0);
    assert_eq!(count(&pool, "ingredient").await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_token_version_defaults_to_zero() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let pool = setup(&dir).await?;
    seed(&pool).await?;

    let (version,) =
        sqlx::query_as::<_, (i64,)>(r#"SELECT token_version FROM "user" WHERE id = 1"#)
            .fetch_one(&pool)
            .await?;
    assert_eq!(version, 0);

    Ok(())
}
