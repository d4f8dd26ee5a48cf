//! Command structs for ledger operations.
//!
//! These types group parameters for write operations, keeping call
//! sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::TransactionKind;

/// Post a transaction against a wallet.
#[derive(Clone, Debug)]
pub struct PostTransactionCmd {
    pub user_id: String,
    pub wallet_id: Uuid,
    pub category_id: Uuid,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub occurred_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl PostTransactionCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        wallet_id: Uuid,
        category_id: Uuid,
        kind: TransactionKind,
        amount_minor: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            wallet_id,
            category_id,
            kind,
            amount_minor,
            occurred_at,
            note: None,
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
