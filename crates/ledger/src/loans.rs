//! Loan records.
//!
//! A loan tracks a debt against a counterparty. It is bookkeeping only: a
//! loan never mutates wallet balances by itself, only a posted `loan_given`
//! or `loan_received` transaction does. Loans and postings are correlated by
//! convention, not by foreign key.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanKind {
    Given,
    Received,
}

impl LoanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "given",
            Self::Received => "received",
        }
    }
}

impl TryFrom<&str> for LoanKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "given" => Ok(Self::Given),
            "received" => Ok(Self::Received),
            other => Err(LedgerError::InvalidKind(format!(
                "invalid loan kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Uuid,
    pub user_id: String,
    pub counterparty: String,
    pub amount_minor: i64,
    pub currency: Currency,
    pub kind: LoanKind,
    pub is_paid: bool,
    pub date: DateTime<Utc>,
}

impl Loan {
    pub fn new(
        user_id: String,
        counterparty: String,
        amount_minor: i64,
        currency: Currency,
        kind: LoanKind,
        date: DateTime<Utc>,
    ) -> ResultLoan {
        if amount_minor < 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "amount_minor must be >= 0, got {amount_minor}"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            counterparty,
            amount_minor,
            currency,
            kind,
            is_paid: false,
            date,
        })
    }
}

type ResultLoan = Result<Loan, LedgerError>;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub counterparty: String,
    pub amount_minor: i64,
    pub currency: String,
    pub kind: String,
    pub is_paid: bool,
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Loan> for ActiveModel {
    fn from(value: &Loan) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            counterparty: ActiveValue::Set(value.counterparty.clone()),
            amount_minor: ActiveValue::Set(value.amount_minor),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            is_paid: ActiveValue::Set(value.is_paid),
            date: ActiveValue::Set(value.date),
        }
    }
}

impl TryFrom<Model> for Loan {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::KeyNotFound("loan not exists".to_string()))?,
            user_id: model.user_id,
            counterparty: model.counterparty,
            amount_minor: model.amount_minor,
            currency: Currency::try_from(model.currency.as_str())?,
            kind: LoanKind::try_from(model.kind.as_str())?,
            is_paid: model.is_paid,
            date: model.date,
        })
    }
}
