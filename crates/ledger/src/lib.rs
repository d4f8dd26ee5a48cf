//! Core wallet ledger: balance-consistent postings over SQLite.
//!
//! The [`Ledger`] owns a [`sea_orm::DatabaseConnection`] and exposes the
//! write and read operations of the system: wallet/category/loan CRUD,
//! posting and deleting transactions, and the monthly reports. Every
//! write that touches a wallet balance runs inside a DB transaction so
//! the stored balance always equals the sum of signed posting deltas.

pub use balance::{is_inflow, reverse_delta, signed_delta};
pub use categories::FinanceCategory;
pub use commands::PostTransactionCmd;
pub use currency::Currency;
pub use error::LedgerError;
pub use loans::{Loan, LoanKind};
pub use ops::{
    CategoryStat, Ledger, LedgerBuilder, LoanListFilter, MonthlySummary, ReportPeriod,
    TransactionListFilter,
};
pub use transactions::{Transaction, TransactionKind};
pub use wallets::Wallet;

mod balance;
pub mod categories;
mod commands;
mod currency;
mod error;
pub mod loans;
mod ops;
pub mod transactions;
pub mod users;
mod util;
pub mod wallets;

type ResultLedger<T> = Result<T, LedgerError>;
