//! Loans API endpoints.

use api_types::loan::{LoanListQuery, LoanNew, LoanUpdate, LoanView, LoansResponse};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ledger::{LoanListFilter, users};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<LoanNew>,
) -> Result<(StatusCode, Json<LoanView>), ServerError> {
    let currency = views::currency_from_wire(payload.currency.unwrap_or_default());
    let loan = state
        .ledger
        .new_loan(
            &user.username,
            &payload.counterparty,
            payload.amount_minor,
            currency,
            views::loan_kind_from_wire(payload.kind),
            payload.date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(views::loan_view(loan))))
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<LoanListQuery>,
) -> Result<Json<LoansResponse>, ServerError> {
    let filter = LoanListFilter {
        kind: query.kind.map(views::loan_kind_from_wire),
        is_paid: query.is_paid,
    };
    let loans = state.ledger.list_loans(&user.username, &filter).await?;
    Ok(Json(LoansResponse {
        loans: loans.into_iter().map(views::loan_view).collect(),
    }))
}

pub async fn get_one(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<LoanView>, ServerError> {
    let loan = state.ledger.loan(&user.username, loan_id).await?;
    Ok(Json(views::loan_view(loan)))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(loan_id): Path<Uuid>,
    Json(payload): Json<LoanUpdate>,
) -> Result<Json<LoanView>, ServerError> {
    let loan = state
        .ledger
        .update_loan(
            &user.username,
            loan_id,
            payload.counterparty.as_deref(),
            payload.amount_minor,
            payload.date,
        )
        .await?;
    Ok(Json(views::loan_view(loan)))
}

pub async fn mark_paid(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<LoanView>, ServerError> {
    let loan = state.ledger.mark_loan_paid(&user.username, loan_id).await?;
    Ok(Json(views::loan_view(loan)))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(loan_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.ledger.delete_loan(&user.username, loan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
