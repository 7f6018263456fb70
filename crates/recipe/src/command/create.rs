use foodgram_db::table::Recipe;
use foodgram_shared::{Result, media};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use super::{IMAGE_DIR, IngredientAmount, write_relations};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, message = "At least one ingredient is required."), nested)]
    pub ingredients: Vec<IngredientAmount>,
    #[validate(length(min = 1, message = "At least one tag is required."))]
    pub tags: Vec<i64>,
    pub image: String,
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(
        min = 1,
        max = 2147483647,
        message = "Cooking time must be between 1 and 2147483647 minutes."
    ))]
    pub cooking_time: i64,
}

impl super::Command {
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, author_id: i64, input: CreateInput) -> Result<i64> {
        input.validate()?;
        self.check_relations(&input.tags, &input.ingredients).await?;

        let image = media::save_data_uri(self.media_root(), IMAGE_DIR, &input.image).await?;

        match self.insert(author_id, &input, &image).await {
            Ok(id) => {
                tracing::info!(recipe_id = id, "recipe created");
                Ok(id)
            }
            Err(e) => {
                media::discard(self.media_root(), &image).await;
                Err(e)
            }
        }
    }

    async fn insert(&self, author_id: i64, input: &CreateInput, image: &str) -> Result<i64> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Text,
                Recipe::CookingTime,
            ])
            .values_panic([
                author_id.into(),
                input.name.to_owned().into(),
                image.to_owned().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        write_relations(&mut *tx, id, Some(&input.tags), Some(&input.ingredients)).await?;

        tx.commit().await?;

        Ok(id)
    }
}
