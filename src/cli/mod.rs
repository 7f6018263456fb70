mod import;
mod migrate;
mod serve;

pub use import::{import_ingredients, import_tags};
pub use migrate::{migrate, reset};
pub use serve::serve;
