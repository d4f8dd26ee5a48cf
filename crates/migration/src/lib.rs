pub use sea_orm_migration::prelude::*;

mod m20260801_000001_users;
mod m20260801_000002_wallets;
mod m20260801_000003_categories;
mod m20260801_000004_transactions;
mod m20260801_000005_loans;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_users::Migration),
            Box::new(m20260801_000002_wallets::Migration),
            Box::new(m20260801_000003_categories::Migration),
            Box::new(m20260801_000004_transactions::Migration),
            Box::new(m20260801_000005_loans::Migration),
        ]
    }
}
