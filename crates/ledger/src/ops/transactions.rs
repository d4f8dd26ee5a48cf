use chrono::{DateTime, Utc};
use uuid::Uuid;

use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{
    Currency, LedgerError, PostTransactionCmd, ResultLedger, Transaction, TransactionKind,
    balance, transactions, wallets,
};

use super::{Ledger, is_retryable, normalize_optional_text, with_tx};

/// Bounded retries for writes that lose the SQLite write lock.
const WRITE_ATTEMPTS: u32 = 3;

/// Re-runs a contended write a bounded number of times, then surfaces
/// `Conflict` so callers can retry at their own pace.
macro_rules! retry_contended {
    ($call:expr) => {{
        let mut attempt = 1;
        loop {
            match $call {
                Err(err) if is_retryable(&err) => {
                    if attempt >= WRITE_ATTEMPTS {
                        break Err(LedgerError::Conflict(
                            "storage busy, gave up after retries".to_string(),
                        ));
                    }
                    tracing::warn!("storage busy on attempt {attempt}, retrying: {err}");
                    attempt += 1;
                }
                other => break other,
            }
        }
    }};
}

/// Filters for listing transactions.
///
/// Date bounds are inclusive on both ends (`[date_from, date_to]`), in UTC.
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub wallet_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub kind: Option<TransactionKind>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

fn validate_list_filter(filter: &TransactionListFilter) -> ResultLedger<()> {
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to)
        && from > to
    {
        return Err(LedgerError::InvalidAmount(
            "invalid range: date_from must be <= date_to".to_string(),
        ));
    }
    Ok(())
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(wallet_id) = filter.wallet_id {
            self = self.filter(transactions::Column::WalletId.eq(wallet_id.to_string()));
        }
        if let Some(category_id) = filter.category_id {
            self = self.filter(transactions::Column::CategoryId.eq(category_id.to_string()));
        }
        if let Some(kind) = filter.kind {
            self = self.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(from) = filter.date_from {
            self = self.filter(transactions::Column::OccurredAt.gte(from));
        }
        if let Some(to) = filter.date_to {
            self = self.filter(transactions::Column::OccurredAt.lte(to));
        }
        self
    }
}

impl Ledger {
    /// Posts a transaction and applies its signed delta to the wallet
    /// balance, in one atomic unit.
    ///
    /// The balance change is pushed into the store (`balance_minor =
    /// balance_minor + delta`) rather than read-modify-written, so two
    /// concurrent posts against the same wallet can never lose an update.
    pub async fn post_transaction(&self, cmd: PostTransactionCmd) -> ResultLedger<Transaction> {
        retry_contended!(self.post_transaction_once(&cmd).await)
    }

    async fn post_transaction_once(&self, cmd: &PostTransactionCmd) -> ResultLedger<Transaction> {
        let delta_minor = balance::signed_delta(cmd.kind, cmd.amount_minor)?;
        with_tx!(self, |db_tx| {
            let wallet_model = self
                .require_wallet(&db_tx, &cmd.user_id, cmd.wallet_id)
                .await?;
            self.require_category(&db_tx, cmd.category_id).await?;
            let currency = Currency::try_from(wallet_model.currency.as_str())?;

            let tx = Transaction::new(
                cmd.wallet_id,
                cmd.user_id.clone(),
                cmd.category_id,
                cmd.kind,
                cmd.amount_minor,
                currency,
                cmd.occurred_at,
                normalize_optional_text(cmd.note.as_deref()),
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            self.apply_wallet_delta(&db_tx, cmd.wallet_id, delta_minor)
                .await?;
            Ok(tx)
        })
    }

    /// Deletes a posted transaction and reverses its effect on the wallet
    /// balance, in one atomic unit. Returns the deleted snapshot.
    pub async fn delete_transaction(
        &self,
        user_id: &str,
        transaction_id: Uuid,
    ) -> ResultLedger<Transaction> {
        retry_contended!(self.delete_transaction_once(user_id, transaction_id).await)
    }

    async fn delete_transaction_once(
        &self,
        user_id: &str,
        transaction_id: Uuid,
    ) -> ResultLedger<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction(&db_tx, user_id, transaction_id)
                .await?;
            let tx = Transaction::try_from(model)?;
            let delta_minor = balance::reverse_delta(tx.kind, tx.amount_minor)?;

            transactions::Entity::delete_by_id(transaction_id.to_string())
                .exec(&db_tx)
                .await?;
            self.apply_wallet_delta(&db_tx, tx.wallet_id, delta_minor)
                .await?;
            Ok(tx)
        })
    }

    /// Returns a single transaction owned by `user_id`.
    pub async fn transaction(
        &self,
        user_id: &str,
        transaction_id: Uuid,
    ) -> ResultLedger<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_transaction(&db_tx, user_id, transaction_id)
                .await?;
            Transaction::try_from(model)
        })
    }

    /// Lists transactions owned by `user_id`, newest first
    /// (`occurred_at DESC`, tiebreak `id DESC`).
    pub async fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionListFilter,
    ) -> ResultLedger<Vec<Transaction>> {
        validate_list_filter(filter)?;

        let rows: Vec<transactions::Model> = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .apply_tx_filters(filter)
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Adds `delta_minor` to the wallet's stored balance in the store itself.
    async fn apply_wallet_delta(
        &self,
        db: &DatabaseTransaction,
        wallet_id: Uuid,
        delta_minor: i64,
    ) -> ResultLedger<()> {
        let result = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::BalanceMinor,
                Expr::col(wallets::Column::BalanceMinor).add(delta_minor),
            )
            .filter(wallets::Column::Id.eq(wallet_id.to_string()))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::KeyNotFound("wallet not exists".to_string()));
        }
        Ok(())
    }
}
