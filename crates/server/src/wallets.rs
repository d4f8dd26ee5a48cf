//! Wallets API endpoints.

use api_types::wallet::{WalletNew, WalletRename, WalletView, WalletsResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use ledger::users;
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<WalletNew>,
) -> Result<(StatusCode, Json<WalletView>), ServerError> {
    let currency = views::currency_from_wire(payload.currency.unwrap_or_default());
    let wallet = state
        .ledger
        .new_wallet(
            &user.username,
            &payload.name,
            payload.balance_minor.unwrap_or(0),
            currency,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(views::wallet_view(wallet))))
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<WalletsResponse>, ServerError> {
    let wallets = state.ledger.list_wallets(&user.username).await?;
    Ok(Json(WalletsResponse {
        wallets: wallets.into_iter().map(views::wallet_view).collect(),
    }))
}

pub async fn get_one(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<WalletView>, ServerError> {
    let wallet = state.ledger.wallet(&user.username, wallet_id).await?;
    Ok(Json(views::wallet_view(wallet)))
}

pub async fn rename(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
    Json(payload): Json<WalletRename>,
) -> Result<Json<WalletView>, ServerError> {
    let wallet = state
        .ledger
        .rename_wallet(&user.username, wallet_id, &payload.name)
        .await?;
    Ok(Json(views::wallet_view(wallet)))
}

pub async fn set_default(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .ledger
        .set_default_wallet(&user.username, wallet_id)
        .await?;
    Ok(StatusCode::OK)
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(wallet_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.ledger.delete_wallet(&user.username, wallet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
