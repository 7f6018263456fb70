mod collection;
mod command;
pub mod ingredient;
pub mod query;
pub mod short_link;
pub mod tag;

pub use collection::*;
pub use command::*;
pub use ingredient::Ingredient;
pub use query::{RecipeDetail, RecipeFilter, RecipeIngredientRow, RecipeRow, RecipeShort};
pub use short_link::{LocalShortener, Shortener, TinyUrlShortener};
pub use tag::Tag;
