use std::sync::Arc;

use axum::{
    Router, middleware,
    extract::{FromRequest, FromRequestParts},
    routing::{get, post, put},
};
use foodgram_recipe::{LocalShortener, Shortener, TinyUrlShortener};
use sqlx::SqlitePool;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    config::{Config, ShortLinkProvider},
    error::AppError,
};

mod auth;
mod health;
mod ingredients;
mod recipes;
mod short_link;
mod tags;
mod users;
pub mod view;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read pool.
    pub pool: SqlitePool,
    pub recipe_command: foodgram_recipe::Command,
    pub user_command: foodgram_user::Command,
    pub shortener: Arc<dyn Shortener>,
}

impl AppState {
    pub fn new(config: Config, state: foodgram_shared::State) -> Self {
        let shortener: Arc<dyn Shortener> = match config.short_link.provider {
            ShortLinkProvider::Local => Arc::new(LocalShortener::new(config.base_url())),
            ShortLinkProvider::Tinyurl => Arc::new(TinyUrlShortener::new(
                config.short_link.tinyurl_endpoint.to_owned(),
            )),
        };

        Self {
            pool: state.read_db.clone(),
            recipe_command: foodgram_recipe::Command::new(state.clone(), &config.media.root),
            user_command: foodgram_user::Command::new(state, &config.media.root),
            shortener,
            config,
        }
    }
}

/// JSON body whose rejection is rendered as an API error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string, repeated keys deserialize into a `Vec`.
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub fn router(app_state: AppState) -> Router {
    let media = ServeDir::new(&app_state.config.media.root);

    let api = Router::new()
        .route("/api/tags/", get(tags::list))
        .route("/api/tags/{id}/", get(tags::detail))
        .route("/api/ingredients/", get(ingredients::list))
        .route("/api/ingredients/{id}/", get(ingredients::detail))
        .route("/api/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route("/api/recipes/{id}/get-link/", get(recipes::get_link))
        .route(
            "/api/recipes/{id}/favorite/",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .route("/api/users/", get(users::list).post(users::register))
        .route("/api/users/me/", get(users::me))
        .route(
            "/api/users/me/avatar/",
            put(users::set_avatar).delete(users::delete_avatar),
        )
        .route("/api/users/set_password/", post(users::set_password))
        .route("/api/users/subscriptions/", get(users::subscriptions))
        .route("/api/users/{id}/", get(users::detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .route("/api/auth/token/login/", post(auth::login))
        .route("/api/auth/token/logout/", post(auth::logout))
        .route("/s/{code}", get(short_link::redirect))
        .route("/s/{code}/", get(short_link::redirect))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            crate::middleware::auth_middleware,
        ))
        .with_state(app_state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .merge(api)
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().br(true).gzip(true))
}
