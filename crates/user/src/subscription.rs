use foodgram_shared::{Error, Page, PageArgs, Result, bail};

use crate::{Command, UserRow, query};

impl Command {
    #[tracing::instrument(skip(self))]
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> Result<UserRow> {
        let author = query::query_user_by_id(&self.read_db, author_id).await?;

        if user_id == author_id {
            bail!("You cannot subscribe to yourself.");
        }

        if query::is_subscribed(&self.read_db, user_id, author_id).await? {
            bail!("You are already subscribed to this author.");
        }

        let inserted = sqlx::query("INSERT INTO subscribe (user_id, author_id) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.write_db)
            .await
            .map_err(Error::from);

        match inserted {
            Ok(_) => Ok(author),
            Err(e) if e.is_unique_violation() => Err(Error::Invalid(
                "You are already subscribed to this author.".to_owned(),
            )),
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<()> {
        query::query_user_by_id(&self.read_db, author_id).await?;

        let result = sqlx::query("DELETE FROM subscribe WHERE user_id = ?1 AND author_id = ?2")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            bail!("You are not subscribed to this author.");
        }

        Ok(())
    }
}

/// Authors `user_id` follows, most recent subscription first.
pub async fn query_subscriptions(
    pool: &sqlx::SqlitePool,
    user_id: i64,
    args: &PageArgs,
) -> Result<Page<UserRow>> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM subscribe WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    args.check(count)?;

    let rows = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.password, u.avatar,
            u.token_version
        FROM subscribe s
        JOIN user u ON u.id = s.author_id
        WHERE s.user_id = ?1
        ORDER BY s.id DESC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(user_id)
    .bind(args.limit() as i64)
    .bind(args.offset() as i64)
    .fetch_all(pool)
    .await?;

    Ok(Page::new(rows, count, args))
}
