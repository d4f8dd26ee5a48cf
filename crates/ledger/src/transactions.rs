//! Transaction (posting) primitives.
//!
//! A `Transaction` is an immutable ledger entry against exactly one wallet.
//! Once created it can only be deleted; there is deliberately no in-place
//! update of amount or kind, so the cached wallet balance never needs an
//! incremental-diff correction.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError, ResultLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    LoanGiven,
    LoanReceived,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::LoanGiven => "loan_given",
            Self::LoanReceived => "loan_received",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "loan_given" => Ok(Self::LoanGiven),
            "loan_received" => Ok(Self::LoanReceived),
            other => Err(LedgerError::InvalidKind(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub user_id: String,
    pub category_id: Uuid,
    pub kind: TransactionKind,
    /// Always non-negative; the sign lives in the kind.
    pub amount_minor: i64,
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wallet_id: Uuid,
        user_id: String,
        category_id: Uuid,
        kind: TransactionKind,
        amount_minor: i64,
        currency: Currency,
        occurred_at: DateTime<Utc>,
        note: Option<String>,
    ) -> ResultLedger<Self> {
        if amount_minor < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "amount_minor must be >= 0, got {amount_minor}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            wallet_id,
            user_id,
            category_id,
            kind,
            amount_minor,
            currency,
            occurred_at,
            note,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub wallet_id: String,
    pub user_id: String,
    pub category_id: String,
    pub kind: String,
    pub amount_minor: i64,
    pub currency: String,
    pub occurred_at: DateTimeUtc,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Wallets,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            wallet_id: ActiveValue::Set(tx.wallet_id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            category_id: ActiveValue::Set(tx.category_id.to_string()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            currency: ActiveValue::Set(tx.currency.code().to_string()),
            occurred_at: ActiveValue::Set(tx.occurred_at),
            note: ActiveValue::Set(tx.note.clone()),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::KeyNotFound("transaction not exists".to_string()))?,
            wallet_id: Uuid::parse_str(&model.wallet_id)
                .map_err(|_| LedgerError::KeyNotFound("wallet not exists".to_string()))?,
            user_id: model.user_id,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| LedgerError::KeyNotFound("category not exists".to_string()))?,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount_minor: model.amount_minor,
            currency: Currency::try_from(model.currency.as_str())?,
            occurred_at: model.occurred_at,
            note: model.note,
        })
    }
}
