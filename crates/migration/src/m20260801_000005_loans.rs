use sea_orm_migration::prelude::*;

use crate::m20260801_000001_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Loans {
    Table,
    Id,
    UserId,
    Counterparty,
    AmountMinor,
    Currency,
    Kind,
    IsPaid,
    Date,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Loans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Loans::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Loans::UserId).string().not_null())
                    .col(ColumnDef::new(Loans::Counterparty).string().not_null())
                    .col(
                        ColumnDef::new(Loans::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Loans::Currency).string().not_null())
                    .col(ColumnDef::new(Loans::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Loans::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Loans::Date).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-loans-user_id")
                            .from(Loans::Table, Loans::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-loans-user_id-date")
                    .table(Loans::Table)
                    .col(Loans::UserId)
                    .col(Loans::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Loans::Table).to_owned())
            .await
    }
}
