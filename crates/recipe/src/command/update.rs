use foodgram_db::table::Recipe;
use foodgram_shared::{Result, media};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use super::{IMAGE_DIR, IngredientAmount, write_relations};

/// Partial update. Given tags/ingredients replace the existing ones.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    #[validate(length(min = 1, message = "At least one ingredient is required."), nested)]
    pub ingredients: Option<Vec<IngredientAmount>>,
    #[validate(length(min = 1, message = "At least one tag is required."))]
    pub tags: Option<Vec<i64>>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(range(
        min = 1,
        max = 2147483647,
        message = "Cooking time must be between 1 and 2147483647 minutes."
    ))]
    pub cooking_time: Option<i64>,
}

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, recipe_id: i64, user_id: i64, input: UpdateInput) -> Result<()> {
        let current = self.check_author(recipe_id, user_id).await?;

        input.validate()?;

        let tags = input.tags.as_deref().unwrap_or_default();
        let ingredients = input.ingredients.as_deref().unwrap_or_default();
        self.check_relations(tags, ingredients).await?;

        let image = match &input.image {
            Some(data) => Some(media::save_data_uri(self.media_root(), IMAGE_DIR, data).await?),
            None => None,
        };

        let statement = Query::update()
            .table(Recipe::Table)
            .values([
                (
                    Recipe::Name,
                    input.name.to_owned().unwrap_or(current.name).into(),
                ),
                (
                    Recipe::Text,
                    input.text.to_owned().unwrap_or(current.text).into(),
                ),
                (
                    Recipe::CookingTime,
                    input.cooking_time.unwrap_or(current.cooking_time).into(),
                ),
                (
                    Recipe::Image,
                    image.to_owned().unwrap_or(current.image.to_owned()).into(),
                ),
            ])
            .and_where(Expr::col(Recipe::Id).eq(recipe_id))
            .to_owned();

        let result: Result<()> = async {
            let mut tx = self.write_db.begin().await?;
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
            write_relations(
                &mut *tx,
                recipe_id,
                input.tags.as_deref(),
                input.ingredients.as_deref(),
            )
            .await?;
            tx.commit().await?;

            Ok(())
        }
        .await;

        match (&result, image) {
            (Ok(()), Some(_)) => media::discard(self.media_root(), &current.image).await,
            (Err(_), Some(image)) => media::discard(self.media_root(), &image).await,
            (_, None) => {}
        }

        result
    }
}
