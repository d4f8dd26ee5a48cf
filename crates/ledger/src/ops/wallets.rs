use uuid::Uuid;

use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{Currency, LedgerError, ResultLedger, Wallet, transactions, wallets};

use super::{Ledger, normalize_name_key, normalize_required_name, with_tx};

impl Ledger {
    /// Adds a new wallet for a user.
    ///
    /// The opening `balance_minor` is stored directly; after creation only
    /// the posting/deletion of transactions ever changes it. Names are
    /// unique per user after normalization, so "Cash" and "cash" collide.
    pub async fn new_wallet(
        &self,
        user_id: &str,
        name: &str,
        balance_minor: i64,
        currency: Currency,
    ) -> ResultLedger<Wallet> {
        let name = normalize_required_name(name, "wallet")?;
        let name_key = normalize_name_key(&name, "wallet")?;
        with_tx!(self, |db_tx| {
            self.require_wallet_name_free(&db_tx, user_id, &name_key, None)
                .await?;

            let wallet = Wallet::new(user_id.to_string(), name, balance_minor, currency);
            wallets::ActiveModel::from(&wallet).insert(&db_tx).await?;
            Ok(wallet)
        })
    }

    /// Return a wallet snapshot from DB.
    pub async fn wallet(&self, user_id: &str, wallet_id: Uuid) -> ResultLedger<Wallet> {
        with_tx!(self, |db_tx| {
            let model = self.require_wallet(&db_tx, user_id, wallet_id).await?;
            Wallet::try_from(model)
        })
    }

    /// Lists the user's wallets, sorted by name.
    pub async fn list_wallets(&self, user_id: &str) -> ResultLedger<Vec<Wallet>> {
        let rows: Vec<wallets::Model> = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(wallets::Column::Name)
            .all(&self.database)
            .await?;
        rows.into_iter().map(Wallet::try_from).collect()
    }

    /// Renames an existing wallet. The new name must not collide with
    /// another wallet of the same user.
    pub async fn rename_wallet(
        &self,
        user_id: &str,
        wallet_id: Uuid,
        new_name: &str,
    ) -> ResultLedger<Wallet> {
        let new_name = normalize_required_name(new_name, "wallet")?;
        let name_key = normalize_name_key(&new_name, "wallet")?;
        with_tx!(self, |db_tx| {
            let model = self.require_wallet(&db_tx, user_id, wallet_id).await?;
            self.require_wallet_name_free(&db_tx, user_id, &name_key, Some(wallet_id))
                .await?;

            let active = wallets::ActiveModel {
                id: ActiveValue::Set(model.id),
                name: ActiveValue::Set(new_name),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Wallet::try_from(updated)
        })
    }

    /// Marks a wallet as the user's default, unsetting the previous default
    /// in the same atomic unit.
    pub async fn set_default_wallet(&self, user_id: &str, wallet_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_wallet(&db_tx, user_id, wallet_id).await?;

            wallets::Entity::update_many()
                .col_expr(wallets::Column::IsDefault, Expr::value(false))
                .filter(wallets::Column::UserId.eq(user_id.to_string()))
                .filter(wallets::Column::IsDefault.eq(true))
                .exec(&db_tx)
                .await?;

            let active = wallets::ActiveModel {
                id: ActiveValue::Set(wallet_id.to_string()),
                is_default: ActiveValue::Set(true),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Deletes a wallet. Refused while transactions still reference it, so
    /// the log never points at a missing wallet.
    pub async fn delete_wallet(&self, user_id: &str, wallet_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_wallet(&db_tx, user_id, wallet_id).await?;

            let referenced = transactions::Entity::find()
                .filter(transactions::Column::WalletId.eq(wallet_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if referenced {
                return Err(LedgerError::Conflict(
                    "wallet has transactions; delete them first".to_string(),
                ));
            }

            wallets::Entity::delete_by_id(model.id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Fails with `ExistingKey` when another wallet of the user normalizes
    /// to the same name key.
    async fn require_wallet_name_free(
        &self,
        db: &sea_orm::DatabaseTransaction,
        user_id: &str,
        name_key: &str,
        exclude: Option<Uuid>,
    ) -> ResultLedger<()> {
        let mut query = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id.to_string()));
        if let Some(id) = exclude {
            query = query.filter(wallets::Column::Id.ne(id.to_string()));
        }
        let rows: Vec<wallets::Model> = query.all(db).await?;
        for row in rows {
            if crate::util::normalize_key(&row.name).as_deref() == Some(name_key) {
                return Err(LedgerError::ExistingKey(row.name));
            }
        }
        Ok(())
    }
}
