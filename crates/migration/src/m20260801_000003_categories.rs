use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum FinanceCategories {
    Table,
    Id,
    Name,
    NameNorm,
    Kind,
    Color,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinanceCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceCategories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinanceCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(FinanceCategories::NameNorm)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinanceCategories::Kind).string().not_null())
                    .col(ColumnDef::new(FinanceCategories::Color).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-finance_categories-name_norm")
                    .table(FinanceCategories::Table)
                    .col(FinanceCategories::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinanceCategories::Table).to_owned())
            .await
    }
}
