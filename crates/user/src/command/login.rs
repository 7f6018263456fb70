use foodgram_shared::{Result, bail};
use serde::Deserialize;
use validator::Validate;

use crate::{UserRow, password, query};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Checks the credentials and returns the matching user.
    #[tracing::instrument(skip_all, fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<UserRow> {
        input.validate()?;

        let Some(user) = query::find_user_by_email(&self.read_db, &input.email).await? else {
            bail!("Unable to log in with provided credentials.");
        };

        if !password::verify_password(&input.password, &user.password)? {
            bail!("Unable to log in with provided credentials.");
        }

        Ok(user)
    }
}
