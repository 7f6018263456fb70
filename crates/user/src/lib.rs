mod command;
pub mod jwt;
pub mod password;
pub mod query;
mod subscription;

pub use command::*;
pub use query::UserRow;
pub use subscription::*;
