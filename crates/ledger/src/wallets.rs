//! The module contains the `Wallet` struct and its sea-orm entity.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Currency;

/// A wallet.
///
/// A wallet is a representation of a real wallet, a bank account or anything
/// else where money is kept. Its `balance_minor` is a cached total derived
/// from the transaction log: only `ops::transactions` ever changes it after
/// creation, as the atomic side effect of posting or deleting a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Stable identifier, generated once and persisted, so the wallet can be
    /// renamed without breaking references.
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub balance_minor: i64,
    pub currency: Currency,
    pub is_default: bool,
}

impl Wallet {
    pub fn new(user_id: String, name: String, balance_minor: i64, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            balance_minor,
            currency,
            is_default: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub balance_minor: i64,
    pub currency: String,
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Wallet> for ActiveModel {
    fn from(value: &Wallet) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            name: ActiveValue::Set(value.name.clone()),
            balance_minor: ActiveValue::Set(value.balance_minor),
            currency: ActiveValue::Set(value.currency.code().to_string()),
            is_default: ActiveValue::Set(value.is_default),
        }
    }
}

impl TryFrom<Model> for Wallet {
    type Error = crate::LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| crate::LedgerError::KeyNotFound("wallet not exists".to_string()))?,
            user_id: model.user_id,
            name: model.name,
            balance_minor: model.balance_minor,
            currency: Currency::try_from(model.currency.as_str())?,
            is_default: model.is_default,
        })
    }
}
