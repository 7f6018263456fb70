#![allow(dead_code)]

use foodgram_recipe::{
    Command, CreateInput, IngredientAmount,
    ingredient::{self, IngredientInput},
    tag::{self, TagInput},
};
use foodgram_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::Path, str::FromStr};

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub async fn setup_command(path: &Path) -> anyhow::Result<Command> {
    let opts = SqliteConnectOptions::from_str(&format!(
        "sqlite:{}",
        path.join("db.sqlite3").display()
    ))?
    .create_if_missing(true)
    .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    tag::import_tags(
        &pool,
        vec![TagInput {
            name: "Lunch".to_owned(),
            slug: "lunch".to_owned(),
        }],
    )
    .await?;
    // ids 1..=3
    ingredient::import_ingredients(
        &pool,
        [("sugar", "g"), ("milk", "ml"), ("egg", "pcs")]
            .into_iter()
            .map(|(name, unit)| IngredientInput {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            })
            .collect(),
    )
    .await?;

    Ok(Command::new(State::single(pool), path.join("media")))
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> anyhow::Result<i64> {
    Ok(sqlx::query(
        "INSERT INTO user (email, username, first_name, last_name, password) VALUES (?1, ?2, 'A', 'B', 'x')",
    )
    .bind(format!("{username}@foodgram.test"))
    .bind(username)
    .execute(pool)
    .await?
    .last_insert_rowid())
}

pub async fn create_recipe(
    cmd: &Command,
    author: i64,
    ingredients: &[(i64, i64)],
) -> anyhow::Result<i64> {
    Ok(cmd
        .create(
            author,
            CreateInput {
                ingredients: ingredients
                    .iter()
                    .map(|&(id, amount)| IngredientAmount { id, amount })
                    .collect(),
                tags: vec![1],
                image: PNG.to_owned(),
                name: "Cake".to_owned(),
                text: "Bake it.".to_owned(),
                cooking_time: 30,
            },
        )
        .await?)
}
