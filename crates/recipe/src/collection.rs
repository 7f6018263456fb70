use foodgram_shared::{Error, Result, bail};

use crate::{Command, RecipeShort, query};

/// Per-user recipe collections backed by a (user, recipe) junction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorite,
    ShoppingCart,
}

impl Collection {
    fn table(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shop_card",
        }
    }

    fn already_exists(self) -> &'static str {
        match self {
            Self::Favorite => "Recipe is already in favorites.",
            Self::ShoppingCart => "Recipe is already in the shopping cart.",
        }
    }

    fn does_not_exist(self) -> &'static str {
        match self {
            Self::Favorite => "Recipe is not in favorites.",
            Self::ShoppingCart => "Recipe is not in the shopping cart.",
        }
    }
}

pub async fn contains(
    pool: &sqlx::SqlitePool,
    collection: Collection,
    recipe_id: i64,
    user_id: i64,
) -> Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = ?1 AND recipe_id = ?2)",
        collection.table()
    );
    let (exists,) = sqlx::query_as::<_, (bool,)>(&sql)
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

impl Command {
    /// Adds the recipe to the user's collection. Adding twice is an error.
    #[tracing::instrument(skip(self))]
    pub async fn add(
        &self,
        collection: Collection,
        recipe_id: i64,
        user_id: i64,
    ) -> Result<RecipeShort> {
        let recipe = query::query_recipe_short(&self.read_db, recipe_id).await?;

        if contains(&self.read_db, collection, recipe_id, user_id).await? {
            bail!("{}", collection.already_exists());
        }

        let sql = format!(
            "INSERT INTO {} (user_id, recipe_id) VALUES (?1, ?2)",
            collection.table()
        );
        let inserted = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.write_db)
            .await
            .map_err(Error::from);

        match inserted {
            Ok(_) => Ok(recipe),
            Err(e) if e.is_unique_violation() => {
                Err(Error::Invalid(collection.already_exists().to_owned()))
            }
            Err(e) => Err(e),
        }
    }

    /// Removes the recipe from the user's collection. Removing a recipe that
    /// is not there is an error.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, collection: Collection, recipe_id: i64, user_id: i64) -> Result<()> {
        query::query_recipe_short(&self.read_db, recipe_id).await?;

        let sql = format!(
            "DELETE FROM {} WHERE user_id = ?1 AND recipe_id = ?2",
            collection.table()
        );
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            bail!("{}", collection.does_not_exist());
        }

        Ok(())
    }
}
