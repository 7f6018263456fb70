#![allow(dead_code)]

use foodgram_recipe::{
    Command, CreateInput, IngredientAmount,
    ingredient::{self, IngredientInput},
    tag::{self, TagInput},
};
use foodgram_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::Path, str::FromStr};

// 1x1 transparent png
pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub async fn setup_test_state(path: &Path) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!(
        "sqlite:{}",
        path.join("db.sqlite3").display()
    ))?
    .create_if_missing(true)
    .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(State::single(pool))
}

pub async fn setup_command(path: &Path) -> anyhow::Result<Command> {
    let state = setup_test_state(path).await?;
    seed(&state.write_db).await?;

    Ok(Command::new(state, path.join("media")))
}

/// Two tags (ids 1, 2) and three ingredients (ids 1..=3).
pub async fn seed(pool: &SqlitePool) -> anyhow::Result<()> {
    tag::import_tags(
        pool,
        vec![
            TagInput {
                name: "Breakfast".to_owned(),
                slug: "breakfast".to_owned(),
            },
            TagInput {
                name: "Dinner".to_owned(),
                slug: "dinner".to_owned(),
            },
        ],
    )
    .await?;

    ingredient::import_ingredients(
        pool,
        vec![
            IngredientInput {
                name: "flour".to_owned(),
                measurement_unit: "g".to_owned(),
            },
            IngredientInput {
                name: "milk".to_owned(),
                measurement_unit: "ml".to_owned(),
            },
            IngredientInput {
                name: "egg".to_owned(),
                measurement_unit: "pcs".to_owned(),
            },
        ],
    )
    .await?;

    Ok(())
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> anyhow::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO user (email, username, first_name, last_name, password)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(format!("{username}@foodgram.test"))
    .bind(username)
    .bind("John")
    .bind("Doe")
    .bind("not-a-real-hash")
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub fn pancakes() -> CreateInput {
    CreateInput {
        ingredients: vec![
            IngredientAmount { id: 1, amount: 200 },
            IngredientAmount { id: 2, amount: 300 },
        ],
        tags: vec![1],
        image: PNG.to_owned(),
        name: "Pancakes".to_owned(),
        text: "Mix and fry.".to_owned(),
        cooking_time: 20,
    }
}

pub async fn count(pool: &SqlitePool, table: &str, recipe_id: i64) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>(&format!(
        "SELECT COUNT(*) FROM {table} WHERE recipe_id = ?1"
    ))
    .bind(recipe_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
