mod user_token_version;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0002",
    vec_box![crate::m0001::Migration],
    vec_box![user_token_version::AddColumn]
);
