//! JSON representations returned by the API.

use axum::http::Uri;
use foodgram_recipe::{RecipeDetail, RecipeIngredientRow, RecipeShort, Tag};
use foodgram_shared::{Page, Result};
use foodgram_user::{UserRow, query};
use serde::Serialize;
use url::Url;

use super::AppState;

pub fn media_url(base_url: &str, path: &str) -> String {
    format!("{base_url}/media/{path}")
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserView {
    pub async fn load(state: &AppState, user: UserRow, viewer: Option<i64>) -> Result<Self> {
        let is_subscribed = match viewer {
            Some(viewer) => query::is_subscribed(&state.pool, viewer, user.id).await?,
            None => false,
        };

        Ok(Self {
            avatar: user
                .avatar
                .map(|path| media_url(state.config.base_url(), &path)),
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        })
    }
}

/// Returned right after registration.
#[derive(Debug, Serialize)]
pub struct RegisteredView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserRow> for RegisteredView {
    fn from(user: UserRow) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeShortView {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl RecipeShortView {
    pub fn new(base_url: &str, recipe: RecipeShort) -> Self {
        Self {
            id: recipe.id,
            image: media_url(base_url, &recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<Tag>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientRow>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

impl RecipeView {
    pub async fn load(state: &AppState, detail: RecipeDetail, viewer: Option<i64>) -> Result<Self> {
        let author = query::query_user_by_id(&state.pool, detail.recipe.author_id).await?;
        let recipe = detail.recipe;

        Ok(Self {
            id: recipe.id,
            tags: detail.tags,
            author: UserView::load(state, author, viewer).await?,
            ingredients: detail.ingredients,
            is_favorited: detail.is_favorited,
            is_in_shopping_cart: detail.is_in_shopping_cart,
            name: recipe.name,
            image: media_url(state.config.base_url(), &recipe.image),
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        })
    }
}

/// An author with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeShortView>,
    pub recipes_count: i64,
}

impl SubscriptionView {
    pub async fn load(
        state: &AppState,
        author: UserRow,
        viewer: i64,
        recipes_limit: Option<u64>,
    ) -> Result<Self> {
        let base_url = state.config.base_url();
        let recipes =
            foodgram_recipe::query::query_recipes_by_author(&state.pool, author.id, recipes_limit)
                .await?;
        let recipes_count =
            foodgram_recipe::query::count_recipes_by_author(&state.pool, author.id).await?;

        Ok(Self {
            user: UserView::load(state, author, Some(viewer)).await?,
            recipes: recipes
                .into_iter()
                .map(|r| RecipeShortView::new(base_url, r))
                .collect(),
            recipes_count,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// `results` replace the page rows, `next`/`previous` point at the same
    /// request with another `page`.
    pub fn new<U>(page: &Page<U>, results: Vec<T>, base_url: &str, uri: &Uri) -> Self {
        Self {
            count: page.count,
            next: page
                .has_next()
                .then(|| page_url(base_url, uri, page.page + 1))
                .flatten(),
            previous: page
                .has_previous()
                .then(|| page_url(base_url, uri, page.page - 1))
                .flatten(),
            results,
        }
    }
}

fn page_url(base_url: &str, uri: &Uri, page: u64) -> Option<String> {
    let mut url = Url::parse(&format!("{base_url}{}", uri.path())).ok()?;
    let pairs = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .into_owned()
        .filter(|(key, _)| key != "page")
        .collect::<Vec<_>>();

    {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(pairs);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    Some(url.to_string())
}
