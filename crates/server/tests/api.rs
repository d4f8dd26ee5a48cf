use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use ledger::Ledger;
use migration::MigratorTrait;

// base64("alice:password")
const AUTH_ALICE: &str = "Basic YWxpY2U6cGFzc3dvcmQ=";
// base64("alice:wrong")
const AUTH_BAD_PASSWORD: &str = "Basic YWxpY2U6d3Jvbmc=";

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();
    let ledger = Ledger::builder().database(db.clone()).build().await.unwrap();
    server::app(ledger, db)
}

fn request(method: &str, uri: &str, auth: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_wallet(app: &Router, name: &str, balance_minor: i64) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/wallets",
            Some(AUTH_ALICE),
            Some(json!({ "name": name, "balance_minor": balance_minor })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

async fn create_category(app: &Router, name: &str, kind: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/categories",
            Some(AUTH_ALICE),
            Some(json!({ "name": name, "kind": kind })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

async fn wallet_balance(app: &Router, wallet_id: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/wallets/{wallet_id}"),
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["balance_minor"].as_i64().unwrap()
}

#[tokio::test]
async fn missing_auth_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(request("GET", "/wallets", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_credentials_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(request("GET", "/wallets", Some(AUTH_BAD_PASSWORD), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wallet_create_defaults_and_list() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/wallets",
            Some(AUTH_ALICE),
            Some(json!({ "name": "Cash" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let wallet = json_body(response).await;
    assert_eq!(wallet["name"], "Cash");
    assert_eq!(wallet["balance_minor"], 0);
    assert_eq!(wallet["currency"], "EUR");
    assert_eq!(wallet["is_default"], false);

    let response = app
        .oneshot(request("GET", "/wallets", Some(AUTH_ALICE), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["wallets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_wallet_name_conflicts() {
    let app = test_app().await;
    create_wallet(&app, "Cash", 0).await;

    // Same name modulo case/accents collides.
    let response = app
        .oneshot(request(
            "POST",
            "/wallets",
            Some(AUTH_ALICE),
            Some(json!({ "name": "  CÀSH " })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn post_and_delete_transaction_round_trips_balance() {
    let app = test_app().await;
    let wallet_id = create_wallet(&app, "Cash", 10_000).await;
    let category_id = create_category(&app, "Groceries", "expense").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(AUTH_ALICE),
            Some(json!({
                "wallet_id": wallet_id,
                "category_id": category_id,
                "kind": "expense",
                "amount_minor": 2_500,
                "occurred_at": "2026-08-10T12:00:00Z",
                "note": "weekly shop"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let tx = json_body(response).await;
    assert_eq!(tx["amount_minor"], 2_500);
    assert_eq!(tx["kind"], "expense");
    let tx_id = tx["id"].as_str().unwrap().to_string();

    assert_eq!(wallet_balance(&app, &wallet_id).await, 7_500);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/transactions/{tx_id}"),
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = json_body(response).await;
    assert_eq!(deleted["id"].as_str().unwrap(), tx_id);

    assert_eq!(wallet_balance(&app, &wallet_id).await, 10_000);

    // Second delete must 404: the posting is gone.
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/transactions/{tx_id}"),
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn negative_amount_unprocessable() {
    let app = test_app().await;
    let wallet_id = create_wallet(&app, "Cash", 0).await;
    let category_id = create_category(&app, "Groceries", "expense").await;

    let response = app
        .oneshot(request(
            "POST",
            "/transactions",
            Some(AUTH_ALICE),
            Some(json!({
                "wallet_id": wallet_id,
                "category_id": category_id,
                "kind": "expense",
                "amount_minor": -1,
                "occurred_at": "2026-08-10T12:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn posting_to_unknown_wallet_not_found() {
    let app = test_app().await;
    let category_id = create_category(&app, "Groceries", "expense").await;

    let response = app
        .oneshot(request(
            "POST",
            "/transactions",
            Some(AUTH_ALICE),
            Some(json!({
                "wallet_id": uuid::Uuid::new_v4(),
                "category_id": category_id,
                "kind": "expense",
                "amount_minor": 100,
                "occurred_at": "2026-08-10T12:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wallet_with_postings_cannot_be_deleted() {
    let app = test_app().await;
    let wallet_id = create_wallet(&app, "Cash", 0).await;
    let category_id = create_category(&app, "Salary", "income").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/transactions",
            Some(AUTH_ALICE),
            Some(json!({
                "wallet_id": wallet_id,
                "category_id": category_id,
                "kind": "income",
                "amount_minor": 100,
                "occurred_at": "2026-08-10T12:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/wallets/{wallet_id}"),
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn set_default_wallet_moves_the_flag() {
    let app = test_app().await;
    let cash = create_wallet(&app, "Cash", 0).await;
    let bank = create_wallet(&app, "Bank", 0).await;

    for id in [&cash, &bank] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                &format!("/wallets/{id}/default"),
                Some(AUTH_ALICE),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(request("GET", "/wallets", Some(AUTH_ALICE), None))
        .await
        .unwrap();
    let body = json_body(response).await;
    let defaults: Vec<&Value> = body["wallets"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|w| w["is_default"] == true)
        .collect();
    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0]["id"].as_str().unwrap(), bank);
}

#[tokio::test]
async fn loan_lifecycle() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/loans",
            Some(AUTH_ALICE),
            Some(json!({
                "counterparty": "Bob",
                "amount_minor": 5_000,
                "kind": "given",
                "date": "2026-08-01T00:00:00Z"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let loan = json_body(response).await;
    assert_eq!(loan["is_paid"], false);
    let loan_id = loan["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/loans/{loan_id}/paid"),
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["is_paid"], true);

    let response = app
        .oneshot(request(
            "GET",
            "/loans?is_paid=true",
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["loans"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn monthly_stats_over_http() {
    let app = test_app().await;
    let wallet_id = create_wallet(&app, "Cash", 0).await;
    let salary = create_category(&app, "Salary", "income").await;
    let groceries = create_category(&app, "Groceries", "expense").await;

    for (category_id, kind, amount) in [
        (&salary, "income", 100_000),
        (&groceries, "expense", 30_000),
    ] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(AUTH_ALICE),
                Some(json!({
                    "wallet_id": wallet_id,
                    "category_id": category_id,
                    "kind": kind,
                    "amount_minor": amount,
                    "occurred_at": "2026-08-15T09:00:00Z"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(request(
            "GET",
            "/stats/monthly?year=2026&month=8",
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["income_minor"], 100_000);
    assert_eq!(body["expense_minor"], 30_000);
    assert_eq!(body["balance_minor"], 70_000);
    assert_eq!(body["transaction_count"], 2);
    assert_eq!(body["period"]["month"], 8);
}

#[tokio::test]
async fn invalid_month_unprocessable() {
    let app = test_app().await;

    let response = app
        .oneshot(request(
            "GET",
            "/stats/monthly?year=2026&month=13",
            Some(AUTH_ALICE),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
