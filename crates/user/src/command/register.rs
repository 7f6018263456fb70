use std::sync::LazyLock;

use foodgram_db::table::User;
use foodgram_shared::{Error, Result, bail};
use regex::Regex;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::{password, query};

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150), regex(path = *USERNAME))]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<i64> {
        input.validate()?;

        if input.username.eq_ignore_ascii_case("me") {
            bail!("Username \"me\" is reserved.");
        }

        if query::find_user_by_email(&self.read_db, &input.email)
            .await?
            .is_some()
        {
            bail!("A user with that email already exists.");
        }

        if query::exists_username(&self.read_db, &input.username).await? {
            bail!("A user with that username already exists.");
        }

        let password_hash = password::hash_password(&input.password)?;

        let statement = Query::insert()
            .into_table(User::Table)
            .columns([
                User::Email,
                User::Username,
                User::FirstName,
                User::LastName,
                User::Password,
            ])
            .values_panic([
                input.email.into(),
                input.username.into(),
                input.first_name.into(),
                input.last_name.into(),
                password_hash.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let inserted = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await
            .map_err(Error::from);

        match inserted {
            Ok(r) => {
                tracing::info!(user_id = r.last_insert_rowid(), "user registered");
                Ok(r.last_insert_rowid())
            }
            Err(e) if e.is_unique_violation() => {
                Err(Error::Invalid("A user with that email or username already exists.".to_owned()))
            }
            Err(e) => Err(e),
        }
    }
}
