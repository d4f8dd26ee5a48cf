//! Reports recomputed from the transaction log.
//!
//! Nothing here reads cached wallet balances: every figure is an
//! aggregation over the postings themselves, with the same sign rule
//! `balance::signed_delta` uses. That keeps reports and balances in
//! agreement by construction.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::{QueryFilter, prelude::*};

use crate::{LedgerError, ResultLedger, TransactionKind, balance, categories, transactions};

use super::Ledger;

/// The calendar month a summary covers: `[start, end)` in UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income_minor: i64,
    pub expense_minor: i64,
    /// `income_minor - expense_minor` for the period.
    pub balance_minor: i64,
    pub transaction_count: u64,
    pub period: ReportPeriod,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category_id: Uuid,
    pub name: String,
    pub color: String,
    pub amount_minor: i64,
    pub count: u64,
}

fn month_period(year: i32, month: u32) -> ResultLedger<ReportPeriod> {
    if !(1..=12).contains(&month) {
        return Err(LedgerError::InvalidAmount(format!(
            "invalid month: {month}"
        )));
    }
    let start = Utc
        .with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| LedgerError::InvalidAmount(format!("invalid period: {year}-{month}")))?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| LedgerError::InvalidAmount(format!("invalid period: {year}-{month}")))?;
    Ok(ReportPeriod {
        year,
        month,
        start,
        end,
    })
}

impl Ledger {
    /// Income/expense totals and net balance for one calendar month.
    pub async fn monthly_balance(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> ResultLedger<MonthlySummary> {
        let period = month_period(year, month)?;

        let rows: Vec<transactions::Model> = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .filter(transactions::Column::OccurredAt.gte(period.start))
            .filter(transactions::Column::OccurredAt.lt(period.end))
            .all(&self.database)
            .await?;

        let mut income_minor = 0i64;
        let mut expense_minor = 0i64;
        let transaction_count = rows.len() as u64;
        for row in rows {
            let kind = TransactionKind::try_from(row.kind.as_str())?;
            if balance::is_inflow(kind) {
                income_minor += row.amount_minor;
            } else {
                expense_minor += row.amount_minor;
            }
        }

        Ok(MonthlySummary {
            income_minor,
            expense_minor,
            balance_minor: income_minor - expense_minor,
            transaction_count,
            period,
        })
    }

    /// Per-category totals for postings of one kind, optionally restricted
    /// to an inclusive date range. Categories with no matching posting are
    /// omitted; the output order is unspecified.
    pub async fn category_distribution(
        &self,
        user_id: &str,
        kind: TransactionKind,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> ResultLedger<Vec<CategoryStat>> {
        if let (Some(from), Some(to)) = (date_from, date_to)
            && from > to
        {
            return Err(LedgerError::InvalidAmount(
                "invalid range: date_from must be <= date_to".to_string(),
            ));
        }

        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .filter(transactions::Column::Kind.eq(kind.as_str()));
        if let Some(from) = date_from {
            query = query.filter(transactions::Column::OccurredAt.gte(from));
        }
        if let Some(to) = date_to {
            query = query.filter(transactions::Column::OccurredAt.lte(to));
        }
        let rows: Vec<transactions::Model> = query.all(&self.database).await?;

        let mut totals: HashMap<String, (i64, u64)> = HashMap::new();
        for row in rows {
            let entry = totals.entry(row.category_id).or_insert((0, 0));
            entry.0 += row.amount_minor;
            entry.1 += 1;
        }
        if totals.is_empty() {
            return Ok(Vec::new());
        }

        let category_models: Vec<categories::Model> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(totals.keys().cloned()))
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(totals.len());
        for model in category_models {
            let Some((amount_minor, count)) = totals.remove(&model.id) else {
                continue;
            };
            let category_id = Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::KeyNotFound("category not exists".to_string()))?;
            out.push(CategoryStat {
                category_id,
                name: model.name,
                color: model.color,
                amount_minor,
                count,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_covers_the_calendar_month() {
        let period = month_period(2026, 2).unwrap();
        assert_eq!(period.start.to_rfc3339(), "2026-02-01T00:00:00+00:00");
        assert_eq!(period.end.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let period = month_period(2025, 12).unwrap();
        assert_eq!(period.end.to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(
            month_period(2026, 13),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            month_period(2026, 0),
            Err(LedgerError::InvalidAmount(_))
        ));
    }
}
