mod favorite;
mod ingredient;
mod recipe;
mod recipe_ingredient;
mod recipe_tag;
mod shop_card;
mod subscribe;
mod tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "foodgram",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        user::CreateUk2,
        tag::CreateTable,
        ingredient::CreateTable,
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe_tag::CreateTable,
        recipe_tag::CreateIdx1,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIdx1,
        favorite::CreateTable,
        favorite::CreateUk1,
        shop_card::CreateTable,
        shop_card::CreateUk1,
        subscribe::CreateTable,
        subscribe::CreateUk1,
    ]
);
