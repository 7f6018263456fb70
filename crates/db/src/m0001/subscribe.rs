use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Subscribe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Subscribe::Table)
        .col(
            ColumnDef::new(Subscribe::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Subscribe::UserId).integer().not_null())
        .col(ColumnDef::new(Subscribe::AuthorId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_subscribe_user")
                .from(Subscribe::Table, Subscribe::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_subscribe_author")
                .from(Subscribe::Table, Subscribe::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Subscribe::Table).to_owned()
}

operation!(CreateTable, create_table, drop_table);

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_subscribe_user_author")
        .table(Subscribe::Table)
        .unique()
        .col(Subscribe::UserId)
        .col(Subscribe::AuthorId)
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_subscribe_user_author")
        .table(Subscribe::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1, drop_uk_1);
