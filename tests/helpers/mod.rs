#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use foodgram::{
    AppState, Config,
    config::{
        DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, ServerConfig,
        ShortLinkConfig,
    },
};
use foodgram_recipe::{
    ingredient::{self, IngredientInput},
    tag::{self, TagInput},
};
use foodgram_shared::State;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";
pub const BASE_URL: &str = "http://testserver";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

pub async fn setup() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("db.sqlite3").display());
    let pool = foodgram::db::create_pool(&url, 1).await?;
    foodgram_db::migrate(&pool).await?;

    tag::import_tags(
        &pool,
        vec![
            TagInput {
                name: "Breakfast".to_owned(),
                slug: "breakfast".to_owned(),
            },
            TagInput {
                name: "Dinner".to_owned(),
                slug: "dinner".to_owned(),
            },
        ],
    )
    .await?;
    ingredient::import_ingredients(
        &pool,
        [("sugar", "g"), ("milk", "ml"), ("egg", "pcs")]
            .into_iter()
            .map(|(name, unit)| IngredientInput {
                name: name.to_owned(),
                measurement_unit: unit.to_owned(),
            })
            .collect(),
    )
    .await?;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            base_url: BASE_URL.to_owned(),
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 1,
        },
        media: MediaConfig {
            root: dir.child("media").to_string_lossy().into_owned(),
        },
        short_link: ShortLinkConfig::default(),
        observability: ObservabilityConfig::default(),
    };

    let state = AppState::new(config, State::single(pool));

    Ok(TestApp {
        router: foodgram::router(state.clone()),
        state,
        _dir: dir,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body)?)
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes().to_vec();

        Ok(TestResponse {
            status,
            headers,
            bytes,
        })
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<TestResponse> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> anyhow::Result<TestResponse> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> anyhow::Result<TestResponse> {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Registers `username` and returns (id, token).
    pub async fn user(&self, username: &str) -> anyhow::Result<(i64, String)> {
        let res = self
            .post(
                "/api/users/",
                None,
                json!({
                    "email": format!("{username}@foodgram.test"),
                    "username": username,
                    "first_name": "John",
                    "last_name": "Doe",
                    "password": "my_password",
                }),
            )
            .await?;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.json());
        let id = res.json()["id"].as_i64().unwrap_or_default();

        let res = self
            .post(
                "/api/auth/token/login/",
                None,
                json!({
                    "email": format!("{username}@foodgram.test"),
                    "password": "my_password",
                }),
            )
            .await?;
        assert_eq!(res.status, StatusCode::OK);
        let token = res.json()["auth_token"]
            .as_str()
            .unwrap_or_default()
            .to_owned();

        Ok((id, token))
    }

    /// Creates a recipe with the given (ingredient id, amount) pairs.
    pub async fn recipe(&self, token: &str, ingredients: &[(i64, i64)]) -> anyhow::Result<i64> {
        let res = self
            .post(
                "/api/recipes/",
                Some(token),
                recipe_body(ingredients, &[1]),
            )
            .await?;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.json());

        Ok(res.json()["id"].as_i64().unwrap_or_default())
    }

    pub async fn count(&self, sql: &str) -> anyhow::Result<i64> {
        let (count,) = sqlx::query_as::<_, (i64,)>(sql)
            .fetch_one(&self.state.pool)
            .await?;

        Ok(count)
    }
}

pub fn recipe_body(ingredients: &[(i64, i64)], tags: &[i64]) -> Value {
    json!({
        "ingredients": ingredients
            .iter()
            .map(|(id, amount)| json!({"id": id, "amount": amount}))
            .collect::<Vec<_>>(),
        "tags": tags,
        "image": PNG,
        "name": "Pancakes",
        "text": "Mix and fry.",
        "cooking_time": 15,
    })
}
