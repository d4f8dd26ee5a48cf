use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{FinanceCategory, LedgerError, ResultLedger, TransactionKind, categories, transactions};

use super::{Ledger, normalize_name_key, normalize_required_name, with_tx};

impl Ledger {
    /// Adds a category. Names are unique household-wide after
    /// normalization.
    pub async fn new_category(
        &self,
        name: &str,
        kind: TransactionKind,
        color: &str,
    ) -> ResultLedger<FinanceCategory> {
        let name = normalize_required_name(name, "category")?;
        let name_key = normalize_name_key(&name, "category")?;
        with_tx!(self, |db_tx| {
            let exists = categories::Entity::find()
                .filter(categories::Column::NameNorm.eq(name_key.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(LedgerError::ExistingKey(name));
            }

            let category = FinanceCategory::new(name, kind, color.to_string());
            category
                .into_active_model(name_key)
                .insert(&db_tx)
                .await?;
            Ok(category)
        })
    }

    pub async fn category(&self, category_id: Uuid) -> ResultLedger<FinanceCategory> {
        with_tx!(self, |db_tx| {
            let model = self.require_category(&db_tx, category_id).await?;
            FinanceCategory::try_from(model)
        })
    }

    /// Lists categories, optionally restricted to one posting kind, sorted
    /// by name.
    pub async fn list_categories(
        &self,
        kind: Option<TransactionKind>,
    ) -> ResultLedger<Vec<FinanceCategory>> {
        let mut query = categories::Entity::find().order_by_asc(categories::Column::Name);
        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }
        let rows: Vec<categories::Model> = query.all(&self.database).await?;
        rows.into_iter().map(FinanceCategory::try_from).collect()
    }

    /// Updates a category's name and/or color. The kind is immutable:
    /// changing it would silently reclassify every posting in the log.
    pub async fn update_category(
        &self,
        category_id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
    ) -> ResultLedger<FinanceCategory> {
        with_tx!(self, |db_tx| {
            let model = self.require_category(&db_tx, category_id).await?;

            let mut active = categories::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                ..Default::default()
            };
            if let Some(name) = name {
                let name = normalize_required_name(name, "category")?;
                let name_key = normalize_name_key(&name, "category")?;
                let taken = categories::Entity::find()
                    .filter(categories::Column::NameNorm.eq(name_key.clone()))
                    .filter(categories::Column::Id.ne(model.id.clone()))
                    .one(&db_tx)
                    .await?
                    .is_some();
                if taken {
                    return Err(LedgerError::ExistingKey(name));
                }
                active.name = ActiveValue::Set(name);
                active.name_norm = ActiveValue::Set(name_key);
            }
            if let Some(color) = color {
                active.color = ActiveValue::Set(color.to_string());
            }

            let updated = active.update(&db_tx).await?;
            FinanceCategory::try_from(updated)
        })
    }

    /// Deletes a category. Refused while transactions still reference it.
    pub async fn delete_category(&self, category_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_category(&db_tx, category_id).await?;

            let referenced = transactions::Entity::find()
                .filter(transactions::Column::CategoryId.eq(category_id.to_string()))
                .one(&db_tx)
                .await?
                .is_some();
            if referenced {
                return Err(LedgerError::Conflict(
                    "category has transactions; reassign them first".to_string(),
                ));
            }

            categories::Entity::delete_by_id(model.id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
