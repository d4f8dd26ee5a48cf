//! Finance category registry.
//!
//! Categories classify postings for reporting. They are referenced, never
//! owned, by transactions: deleting a category is refused while postings
//! still point at it.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, TransactionKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceCategory {
    pub id: Uuid,
    pub name: String,
    /// Which posting kind this category applies to.
    pub kind: TransactionKind,
    /// Display color, e.g. `#ffaa00`.
    pub color: String,
}

impl FinanceCategory {
    pub fn new(name: String, kind: TransactionKind, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            kind,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "finance_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Accent-stripped, casefolded form of `name`, used for uniqueness.
    pub name_norm: String,
    pub kind: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FinanceCategory {
    pub(crate) fn into_active_model(&self, name_norm: String) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::Set(self.id.to_string()),
            name: ActiveValue::Set(self.name.clone()),
            name_norm: ActiveValue::Set(name_norm),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            color: ActiveValue::Set(self.color.clone()),
        }
    }
}

impl TryFrom<Model> for FinanceCategory {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::KeyNotFound("category not exists".to_string()))?,
            name: model.name,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            color: model.color,
        })
    }
}
