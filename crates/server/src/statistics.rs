//! Statistics API endpoints.

use api_types::stats::{
    CategoryStatsQuery, CategoryStatsResponse, MonthlyQuery, MonthlySummaryView,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use ledger::users;

use crate::{ServerError, server::ServerState, views};

pub async fn monthly(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlySummaryView>, ServerError> {
    let summary = state
        .ledger
        .monthly_balance(&user.username, query.year, query.month)
        .await?;
    Ok(Json(views::monthly_summary_view(summary)))
}

pub async fn categories(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<CategoryStatsQuery>,
) -> Result<Json<CategoryStatsResponse>, ServerError> {
    let stats = state
        .ledger
        .category_distribution(
            &user.username,
            views::kind_from_wire(query.kind),
            query.date_from,
            query.date_to,
        )
        .await?;
    Ok(Json(CategoryStatsResponse {
        categories: stats.into_iter().map(views::category_stat_view).collect(),
    }))
}
