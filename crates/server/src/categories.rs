//! Categories API endpoints.
//!
//! Categories are shared across the household, so no handler here scopes
//! by the authenticated user; auth still gates access to the routes.

use api_types::category::{
    CategoriesResponse, CategoryListQuery, CategoryNew, CategoryUpdate, CategoryView,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, views};

/// Fallback display color for categories created without one.
const DEFAULT_COLOR: &str = "#999999";

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let color = payload.color.as_deref().unwrap_or(DEFAULT_COLOR);
    let category = state
        .ledger
        .new_category(&payload.name, views::kind_from_wire(payload.kind), color)
        .await?;
    Ok((StatusCode::CREATED, Json(views::category_view(category))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    let categories = state
        .ledger
        .list_categories(query.kind.map(views::kind_from_wire))
        .await?;
    Ok(Json(CategoriesResponse {
        categories: categories.into_iter().map(views::category_view).collect(),
    }))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state.ledger.category(category_id).await?;
    Ok(Json(views::category_view(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .ledger
        .update_category(
            category_id,
            payload.name.as_deref(),
            payload.color.as_deref(),
        )
        .await?;
    Ok(Json(views::category_view(category)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.ledger.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
