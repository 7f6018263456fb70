use foodgram_shared::{Result, media};

impl super::Command {
    /// Junction rows go with the recipe through ON DELETE CASCADE.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, recipe_id: i64, user_id: i64) -> Result<()> {
        let recipe = self.check_author(recipe_id, user_id).await?;

        sqlx::query("DELETE FROM recipe WHERE id = ?1")
            .bind(recipe_id)
            .execute(&self.write_db)
            .await?;

        media::discard(self.media_root(), &recipe.image).await;

        tracing::info!(recipe_id, "recipe deleted");

        Ok(())
    }
}
