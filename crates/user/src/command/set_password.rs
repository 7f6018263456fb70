use foodgram_shared::{Result, bail};
use serde::Deserialize;
use validator::Validate;

use crate::{password, query};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub current_password: String,
}

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn set_password(&self, user_id: i64, input: SetPasswordInput) -> Result<()> {
        input.validate()?;

        let user = query::query_user_by_id(&self.read_db, user_id).await?;
        if !password::verify_password(&input.current_password, &user.password)? {
            bail!("Invalid password.");
        }

        // outstanding tokens stop working with the old password
        sqlx::query(
            "UPDATE user SET password = ?1, token_version = token_version + 1 WHERE id = ?2",
        )
        .bind(password::hash_password(&input.new_password)?)
        .bind(user_id)
        .execute(&self.write_db)
        .await?;

        Ok(())
    }
}
