//! Transactions API endpoints.

use api_types::transaction::{
    TransactionListQuery, TransactionNew, TransactionView, TransactionsResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ledger::{PostTransactionCmd, TransactionListFilter, users};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = PostTransactionCmd::new(
        &user.username,
        payload.wallet_id,
        payload.category_id,
        views::kind_from_wire(payload.kind),
        payload.amount_minor,
        payload.occurred_at,
    );
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }

    let tx = state.ledger.post_transaction(cmd).await?;
    Ok((StatusCode::CREATED, Json(views::transaction_view(tx))))
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<TransactionListQuery>,
) -> Result<Json<TransactionsResponse>, ServerError> {
    let filter = TransactionListFilter {
        wallet_id: query.wallet_id,
        category_id: query.category_id,
        kind: query.kind.map(views::kind_from_wire),
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let transactions = state.ledger.list_transactions(&user.username, &filter).await?;
    Ok(Json(TransactionsResponse {
        transactions: transactions
            .into_iter()
            .map(views::transaction_view)
            .collect(),
    }))
}

pub async fn get_one(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .ledger
        .transaction(&user.username, transaction_id)
        .await?;
    Ok(Json(views::transaction_view(tx)))
}

/// Deletes a posting and returns the removed record; the wallet balance
/// is rolled back atomically by the ledger.
pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .ledger
        .delete_transaction(&user.username, transaction_id)
        .await?;
    Ok(Json(views::transaction_view(tx)))
}
