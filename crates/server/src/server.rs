use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{categories, loans, statistics, transactions, wallets};
use ledger::{Ledger, users};

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<Ledger>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<users::Model> = users::Entity::find()
        .filter(users::Column::Username.eq(auth_header.username()))
        .filter(users::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/wallets", post(wallets::create).get(wallets::list))
        .route(
            "/wallets/{id}",
            get(wallets::get_one)
                .patch(wallets::rename)
                .delete(wallets::remove),
        )
        .route("/wallets/{id}/default", post(wallets::set_default))
        .route(
            "/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get_one).delete(transactions::remove),
        )
        .route(
            "/categories",
            post(categories::create).get(categories::list),
        )
        .route(
            "/categories/{id}",
            get(categories::get_one)
                .patch(categories::update)
                .delete(categories::remove),
        )
        .route("/loans", post(loans::create).get(loans::list))
        .route(
            "/loans/{id}",
            get(loans::get_one)
                .patch(loans::update)
                .delete(loans::remove),
        )
        .route("/loans/{id}/paid", post(loans::mark_paid))
        .route("/stats/monthly", get(statistics::monthly))
        .route("/stats/categories", get(statistics::categories))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

/// Builds the full application router, auth included.
pub fn app(ledger: Ledger, db: DatabaseConnection) -> Router {
    router(ServerState {
        ledger: Arc::new(ledger),
        db,
    })
}

pub async fn run_with_listener(
    ledger: Ledger,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(ledger, db)).await
}
