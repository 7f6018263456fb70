use sea_query::{ColumnDef, Table, TableAlterStatement};

use crate::table::User;

fn add_column() -> TableAlterStatement {
    Table::alter()
        .table(User::Table)
        .add_column(
            ColumnDef::new(User::TokenVersion)
                .integer()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn drop_column() -> TableAlterStatement {
    Table::alter()
        .table(User::Table)
        .drop_column(User::TokenVersion)
        .to_owned()
}

operation!(AddColumn, add_column, drop_column);
