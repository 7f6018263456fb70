pub mod auth;

pub use auth::{Auth, MaybeAuth, auth_middleware};
