use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger, categories, loans, transactions, wallets};

use super::Ledger;

/// Generates a `require_*` method returning the model of an owner-scoped
/// entity, or `KeyNotFound` when the row is absent or owned by someone else.
macro_rules! impl_require_owned {
    ($require_fn:ident, $entity:path, $user_col:expr, $model:ty, $err_msg:literal) => {
        pub(super) async fn $require_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: &str,
            target_id: Uuid,
        ) -> ResultLedger<$model> {
            <$entity>::find_by_id(target_id.to_string())
                .filter($user_col.eq(user_id.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Ledger {
    impl_require_owned!(
        require_wallet,
        wallets::Entity,
        wallets::Column::UserId,
        wallets::Model,
        "wallet not exists"
    );

    impl_require_owned!(
        require_transaction,
        transactions::Entity,
        transactions::Column::UserId,
        transactions::Model,
        "transaction not exists"
    );

    impl_require_owned!(
        require_loan,
        loans::Entity,
        loans::Column::UserId,
        loans::Model,
        "loan not exists"
    );

    /// Categories are shared across the household, so the lookup is not
    /// owner-scoped.
    pub(super) async fn require_category(
        &self,
        db: &DatabaseTransaction,
        category_id: Uuid,
    ) -> ResultLedger<categories::Model> {
        categories::Entity::find_by_id(category_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| LedgerError::KeyNotFound("category not exists".to_string()))
    }
}
