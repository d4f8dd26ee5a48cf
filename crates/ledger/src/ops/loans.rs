use chrono::{DateTime, Utc};
use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Currency, LedgerError, Loan, LoanKind, ResultLedger, loans};

use super::{Ledger, normalize_required_name, with_tx};

/// Filters for listing loans.
#[derive(Clone, Debug, Default)]
pub struct LoanListFilter {
    pub kind: Option<LoanKind>,
    pub is_paid: Option<bool>,
}

impl Ledger {
    /// Records a loan. Loans track money owed to or by the household and
    /// never touch wallet balances; the matching wallet movement is a
    /// separate `loan_given`/`loan_received` posting.
    pub async fn new_loan(
        &self,
        user_id: &str,
        counterparty: &str,
        amount_minor: i64,
        currency: Currency,
        kind: LoanKind,
        date: DateTime<Utc>,
    ) -> ResultLedger<Loan> {
        let counterparty = normalize_required_name(counterparty, "counterparty")?;
        let loan = Loan::new(
            user_id.to_string(),
            counterparty,
            amount_minor,
            currency,
            kind,
            date,
        )?;
        loans::ActiveModel::from(&loan).insert(&self.database).await?;
        Ok(loan)
    }

    pub async fn loan(&self, user_id: &str, loan_id: Uuid) -> ResultLedger<Loan> {
        with_tx!(self, |db_tx| {
            let model = self.require_loan(&db_tx, user_id, loan_id).await?;
            Loan::try_from(model)
        })
    }

    /// Lists the user's loans, newest first.
    pub async fn list_loans(
        &self,
        user_id: &str,
        filter: &LoanListFilter,
    ) -> ResultLedger<Vec<Loan>> {
        let mut query = loans::Entity::find()
            .filter(loans::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(loans::Column::Date);
        if let Some(kind) = filter.kind {
            query = query.filter(loans::Column::Kind.eq(kind.as_str()));
        }
        if let Some(is_paid) = filter.is_paid {
            query = query.filter(loans::Column::IsPaid.eq(is_paid));
        }
        let rows: Vec<loans::Model> = query.all(&self.database).await?;
        rows.into_iter().map(Loan::try_from).collect()
    }

    /// Updates a loan's counterparty, amount or date.
    pub async fn update_loan(
        &self,
        user_id: &str,
        loan_id: Uuid,
        counterparty: Option<&str>,
        amount_minor: Option<i64>,
        date: Option<DateTime<Utc>>,
    ) -> ResultLedger<Loan> {
        if let Some(amount) = amount_minor
            && amount < 0
        {
            return Err(LedgerError::InvalidAmount(format!(
                "amount_minor must be >= 0, got {amount}"
            )));
        }
        with_tx!(self, |db_tx| {
            let model = self.require_loan(&db_tx, user_id, loan_id).await?;

            let mut active = loans::ActiveModel {
                id: ActiveValue::Set(model.id),
                ..Default::default()
            };
            if let Some(counterparty) = counterparty {
                let counterparty = normalize_required_name(counterparty, "counterparty")?;
                active.counterparty = ActiveValue::Set(counterparty);
            }
            if let Some(amount) = amount_minor {
                active.amount_minor = ActiveValue::Set(amount);
            }
            if let Some(date) = date {
                active.date = ActiveValue::Set(date);
            }

            let updated = active.update(&db_tx).await?;
            Loan::try_from(updated)
        })
    }

    /// Marks a loan as settled. Idempotent.
    pub async fn mark_loan_paid(&self, user_id: &str, loan_id: Uuid) -> ResultLedger<Loan> {
        with_tx!(self, |db_tx| {
            let model = self.require_loan(&db_tx, user_id, loan_id).await?;

            let active = loans::ActiveModel {
                id: ActiveValue::Set(model.id),
                is_paid: ActiveValue::Set(true),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Loan::try_from(updated)
        })
    }

    pub async fn delete_loan(&self, user_id: &str, loan_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_loan(&db_tx, user_id, loan_id).await?;
            loans::Entity::delete_by_id(model.id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
