use foodgram_shared::{Result, bail, media};
use serde::Deserialize;

use crate::query;

const AVATAR_DIR: &str = "users";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarInput {
    pub avatar: Option<String>,
}

impl super::Command {
    /// Stores a new avatar and returns its path relative to the media root.
    #[tracing::instrument(skip(self, input))]
    pub async fn set_avatar(&self, user_id: i64, input: AvatarInput) -> Result<String> {
        let Some(data) = input.avatar.filter(|a| !a.is_empty()) else {
            bail!("Avatar is required.");
        };

        let user = query::query_user_by_id(&self.read_db, user_id).await?;
        let path = media::save_data_uri(self.media_root(), AVATAR_DIR, &data).await?;

        let updated = sqlx::query("UPDATE user SET avatar = ?1 WHERE id = ?2")
            .bind(&path)
            .bind(user_id)
            .execute(&self.write_db)
            .await;

        if let Err(e) = updated {
            media::discard(self.media_root(), &path).await;
            return Err(e.into());
        }

        if let Some(old) = user.avatar {
            media::discard(self.media_root(), &old).await;
        }

        Ok(path)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_avatar(&self, user_id: i64) -> Result<()> {
        let user = query::query_user_by_id(&self.read_db, user_id).await?;

        sqlx::query("UPDATE user SET avatar = NULL WHERE id = ?1")
            .bind(user_id)
            .execute(&self.write_db)
            .await?;

        if let Some(old) = user.avatar {
            media::discard(self.media_root(), &old).await;
        }

        Ok(())
    }
}
