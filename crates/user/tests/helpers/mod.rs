#![allow(dead_code)]

use foodgram_shared::State;
use foodgram_user::{Command, RegisterInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::{path::Path, str::FromStr};

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

    Ok(Command::new(state, path.join("media")))
}

pub fn input(username: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{username}@foodgram.test"),
        username: username.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        password: "my_password".to_owned(),
    }
}

pub async fn register(cmd: &Command, username: &str) -> anyhow::Result<i64> {
    Ok(cmd.register(input(username)).await?)
}
