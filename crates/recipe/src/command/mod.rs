mod create;
mod delete;
mod update;

use std::{ops::Deref, path::PathBuf};

use foodgram_shared::{Error, Result, State, bail};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use create::CreateInput;
pub use update::UpdateInput;

pub(crate) const IMAGE_DIR: &str = "recipes/images";

#[derive(Clone)]
pub struct Command {
    state: State,
    media_root: PathBuf,
}

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: State, media_root: impl Into<PathBuf>) -> Self {
        Self {
            state,
            media_root: media_root.into(),
        }
    }

    pub fn media_root(&self) -> &std::path::Path {
        &self.media_root
    }

    /// Only the author may change or delete a recipe.
    async fn check_author(&self, recipe_id: i64, user_id: i64) -> Result<crate::RecipeRow> {
        let recipe = crate::query::query_recipe_by_id(&self.read_db, recipe_id).await?;
        if recipe.author_id != user_id {
            return Err(Error::Forbidden);
        }

        Ok(recipe)
    }

    /// Tags and ingredients must be unique within a recipe and exist.
    async fn check_relations(&self, tags: &[i64], ingredients: &[IngredientAmount]) -> Result<()> {
        let mut tag_ids = tags.to_vec();
        tag_ids.sort_unstable();
        tag_ids.dedup();
        if tag_ids.len() != tags.len() {
            bail!("Tags must not repeat.");
        }
        if crate::tag::count_existing(&self.read_db, &tag_ids).await? != tag_ids.len() as i64 {
            bail!("Unknown tag.");
        }

        let mut ingredient_ids = ingredients.iter().map(|i| i.id).collect::<Vec<_>>();
        ingredient_ids.sort_unstable();
        ingredient_ids.dedup();
        if ingredient_ids.len() != ingredients.len() {
            bail!("Ingredients must not repeat.");
        }
        if crate::ingredient::count_existing(&self.read_db, &ingredient_ids).await?
            != ingredient_ids.len() as i64
        {
            bail!("Unknown ingredient.");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientAmount {
    pub id: i64,
    #[validate(range(
        min = 1,
        max = 2147483647,
        message = "Amount must be between 1 and 2147483647."
    ))]
    pub amount: i64,
}

/// Replaces the recipe's tag and ingredient rows inside `tx`.
async fn write_relations(
    tx: &mut sqlx::SqliteConnection,
    recipe_id: i64,
    tags: Option<&[i64]>,
    ingredients: Option<&[IngredientAmount]>,
) -> Result<()> {
    use foodgram_db::table::{RecipeIngredient, RecipeTag};
    use sea_query::{Query, SqliteQueryBuilder};
    use sea_query_sqlx::SqlxBinder;

    if let Some(tags) = tags {
        sqlx::query("DELETE FROM recipe_tag WHERE recipe_id = ?1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        let mut statement = Query::insert()
            .into_table(RecipeTag::Table)
            .columns([RecipeTag::RecipeId, RecipeTag::TagId])
            .to_owned();
        for tag_id in tags {
            statement.values_panic([recipe_id.into(), (*tag_id).into()]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
    }

    if let Some(ingredients) = ingredients {
        sqlx::query("DELETE FROM recipe_ingredient WHERE recipe_id = ?1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        let mut statement = Query::insert()
            .into_table(RecipeIngredient::Table)
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientId,
                RecipeIngredient::Amount,
            ])
            .to_owned();
        for ingredient in ingredients {
            statement.values_panic([
                recipe_id.into(),
                ingredient.id.into(),
                ingredient.amount.into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
    }

    Ok(())
}
