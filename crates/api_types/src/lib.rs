use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    LoanGiven,
    LoanReceived,
}

pub mod wallet {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletNew {
        pub name: String,
        /// Opening balance in minor units; defaults to 0.
        pub balance_minor: Option<i64>,
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletRename {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: Uuid,
        pub name: String,
        pub balance_minor: i64,
        pub currency: Currency,
        pub is_default: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletsResponse {
        pub wallets: Vec<WalletView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub wallet_id: Uuid,
        pub category_id: Uuid,
        pub kind: TransactionKind,
        /// Must be >= 0. The kind defines the sign of the balance change.
        pub amount_minor: i64,
        /// RFC3339 timestamp in UTC.
        pub occurred_at: DateTime<Utc>,
        pub note: Option<String>,
    }

    /// Query parameters for `GET /transactions`; date bounds are inclusive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        pub wallet_id: Option<Uuid>,
        pub category_id: Option<Uuid>,
        pub kind: Option<TransactionKind>,
        pub date_from: Option<DateTime<Utc>>,
        pub date_to: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub wallet_id: Uuid,
        pub category_id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub currency: Currency,
        pub occurred_at: DateTime<Utc>,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionsResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        pub kind: TransactionKind,
        /// Display color, e.g. `#ffaa00`; defaults server-side.
        pub color: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryListQuery {
        pub kind: Option<TransactionKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: Option<String>,
        pub color: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub kind: TransactionKind,
        pub color: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriesResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod loan {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum LoanKind {
        Given,
        Received,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoanNew {
        pub counterparty: String,
        pub amount_minor: i64,
        pub currency: Option<Currency>,
        pub kind: LoanKind,
        /// RFC3339 timestamp in UTC.
        pub date: DateTime<Utc>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LoanListQuery {
        pub kind: Option<LoanKind>,
        pub is_paid: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoanUpdate {
        pub counterparty: Option<String>,
        pub amount_minor: Option<i64>,
        pub date: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoanView {
        pub id: Uuid,
        pub counterparty: String,
        pub amount_minor: i64,
        pub currency: Currency,
        pub kind: LoanKind,
        pub is_paid: bool,
        pub date: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoansResponse {
        pub loans: Vec<LoanView>,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyQuery {
        pub year: i32,
        pub month: u32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodView {
        pub year: i32,
        pub month: u32,
        pub start: DateTime<Utc>,
        pub end: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlySummaryView {
        pub income_minor: i64,
        pub expense_minor: i64,
        pub balance_minor: i64,
        pub transaction_count: u64,
        pub period: PeriodView,
    }

    /// Query parameters for `GET /stats/categories`; bounds are inclusive.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatsQuery {
        pub kind: TransactionKind,
        pub date_from: Option<DateTime<Utc>>,
        pub date_to: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatView {
        pub category_id: Uuid,
        pub name: String,
        pub color: String,
        pub amount_minor: i64,
        pub count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatsResponse {
        pub categories: Vec<CategoryStatView>,
    }
}
