use anyhow::Result;
use sqlx::migrate::MigrateDatabase;

use crate::Config;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    foodgram_db::migrate(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drops the database and media files, then migrates from scratch.
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    if tokio::fs::try_exists(&config.media.root).await? {
        tracing::warn!("Removing media directory: {}", config.media.root);
        tokio::fs::remove_dir_all(&config.media.root).await?;
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
