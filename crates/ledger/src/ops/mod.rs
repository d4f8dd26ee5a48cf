use sea_orm::DatabaseConnection;

use crate::{LedgerError, ResultLedger};

mod access;
mod categories;
mod loans;
mod reports;
mod transactions;
mod wallets;

pub use loans::LoanListFilter;
pub use reports::{CategoryStat, MonthlySummary, ReportPeriod};
pub use transactions::TransactionListFilter;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger: all reads and writes go through this handle.
#[derive(Debug)]
pub struct Ledger {
    database: DatabaseConnection,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultLedger<String> {
    crate::util::normalize_display(value).ok_or_else(|| {
        LedgerError::InvalidAmount(format!("{label} name must not be empty"))
    })
}

fn normalize_name_key(value: &str, label: &str) -> ResultLedger<String> {
    crate::util::normalize_key(value).ok_or_else(|| {
        LedgerError::InvalidAmount(format!("{label} name must not be empty"))
    })
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// SQLite reports write contention as "database is locked" / "database is
/// busy"; those are the only errors worth retrying.
fn is_retryable(err: &LedgerError) -> bool {
    match err {
        LedgerError::Database(db_err) => {
            let msg = db_err.to_string().to_lowercase();
            msg.contains("locked") || msg.contains("busy")
        }
        _ => false,
    }
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Construct `Ledger`
    pub async fn build(self) -> ResultLedger<Ledger> {
        Ok(Ledger {
            database: self.database,
        })
    }
}
