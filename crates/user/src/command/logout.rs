use foodgram_shared::{Error, Result};

impl super::Command {
    /// Revokes every token issued to the user so far.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self, user_id: i64) -> Result<()> {
        let result =
            sqlx::query("UPDATE user SET token_version = token_version + 1 WHERE id = ?1")
                .bind(user_id)
                .execute(&self.write_db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
