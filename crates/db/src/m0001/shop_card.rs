use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{ShopCard, Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShopCard::Table)
        .col(
            ColumnDef::new(ShopCard::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(ShopCard::UserId).integer().not_null())
        .col(ColumnDef::new(ShopCard::RecipeId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_shop_card_user")
                .from(ShopCard::Table, ShopCard::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shop_card_recipe")
                .from(ShopCard::Table, ShopCard::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShopCard::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_shop_card_user_recipe")
        .table(ShopCard::Table)
        .unique()
        .col(ShopCard::UserId)
        .col(ShopCard::RecipeId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_shop_card_user_recipe")
        .table(ShopCard::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);
