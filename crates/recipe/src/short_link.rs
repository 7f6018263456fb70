use foodgram_shared::{Error, Result};

use crate::Command;

const MAX_ATTEMPTS: usize = 5;

/// Turns a long URL into a short one.
#[async_trait::async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, url: &str) -> anyhow::Result<String>;
}

/// Public page of a recipe, the target of every short link.
pub fn canonical_url(base_url: &str, recipe_id: i64) -> String {
    format!("{}/recipes/{recipe_id}", base_url.trim_end_matches('/'))
}

/// Short links served by this application under `/s/{code}`.
#[derive(Debug, Clone)]
pub struct LocalShortener {
    base_url: String,
}

impl LocalShortener {
    pub const CODE_LEN: usize = 8;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn url(&self, code: &str) -> String {
        format!("{}/s/{code}", self.base_url)
    }
}

#[async_trait::async_trait]
impl Shortener for LocalShortener {
    async fn shorten(&self, _url: &str) -> anyhow::Result<String> {
        let id = ulid::Ulid::new().to_string().to_lowercase();
        let code = &id[id.len() - Self::CODE_LEN..];

        Ok(self.url(code))
    }
}

#[derive(Debug, Clone)]
pub struct TinyUrlShortener {
    client: reqwest::Client,
    endpoint: String,
}

impl TinyUrlShortener {
    pub const DEFAULT_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl Shortener for TinyUrlShortener {
    async fn shorten(&self, url: &str) -> anyhow::Result<String> {
        let request_url = format!("{}?url={}", self.endpoint, urlencoding::encode(url));
        let short = self
            .client
            .get(request_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let short = short.trim();
        if !short.starts_with("http") {
            anyhow::bail!("unexpected tinyurl response: {short}");
        }

        Ok(short.to_owned())
    }
}

impl Command {
    /// Returns the recipe's short link, creating and storing it on first use.
    #[tracing::instrument(skip(self, shortener))]
    pub async fn short_link(
        &self,
        recipe_id: i64,
        base_url: &str,
        shortener: &dyn Shortener,
    ) -> Result<String> {
        let recipe = crate::query::query_recipe_by_id(&self.read_db, recipe_id).await?;
        if let Some(link) = recipe.short_link {
            return Ok(link);
        }

        let url = canonical_url(base_url, recipe_id);

        for _ in 0..MAX_ATTEMPTS {
            let link = shortener.shorten(&url).await?;

            let updated = sqlx::query(
                "UPDATE recipe SET short_link = ?1 WHERE id = ?2 AND short_link IS NULL",
            )
            .bind(&link)
            .bind(recipe_id)
            .execute(&self.write_db)
            .await
            .map_err(Error::from);

            match updated {
                Ok(r) if r.rows_affected() > 0 => {
                    tracing::info!(recipe_id, %link, "short link created");
                    return Ok(link);
                }
                // another request stored one first, or the recipe is gone
                Ok(_) => {
                    let recipe =
                        crate::query::query_recipe_by_id(&self.write_db, recipe_id).await?;
                    return recipe.short_link.ok_or(Error::NotFound);
                }
                Err(e) if e.is_unique_violation() => {
                    tracing::warn!(recipe_id, %link, "short link collision");
                }
                Err(e) => return Err(e),
            }
        }

        Err(anyhow::anyhow!("no unique short link after {MAX_ATTEMPTS} attempts").into())
    }
}
