use axum::http::StatusCode;
use minicrm::api;
use minicrm::db::init_db;
use minicrm::Repository;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(Repository::new(pool));
    let app = api::create_router(api::AppState::new(repo));

    TestApp {
        app,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_create_customer_returns_record_with_id() {
    let test_app = setup_test_app().await;

    let (status, body) = request(
        test_app.app,
        "POST",
        "/customers/",
        Some(json!({"name": "Acme", "email": "a@acme.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["email"], "a@acme.com");
    assert!(body["phone"].is_null());
    assert!(body["address"].is_null());
}

#[tokio::test]
async fn test_create_customer_id_stable_on_get() {
    let test_app = setup_test_app().await;

    let (_status, created) = request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({
            "name": "Acme",
            "email": "a@acme.com",
            "phone": "555-0100",
            "address": "1 Main St"
        })),
    )
    .await;

    let uri = format!("/customers/{}", created["id"]);
    let (status, fetched) = request(test_app.app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_customer_duplicate_email_rejected() {
    let test_app = setup_test_app().await;

    let (status, _body) = request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({"name": "Acme", "email": "a@acme.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = request(
        test_app.app,
        "POST",
        "/customers/",
        Some(json!({"name": "Other", "email": "a@acme.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_customer_missing_required_field_rejected() {
    let test_app = setup_test_app().await;

    let (status, _body) = request(
        test_app.app,
        "POST",
        "/customers/",
        Some(json!({"name": "Acme"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_missing_customer_returns_404() {
    let test_app = setup_test_app().await;

    let (status, body) = request(test_app.app, "GET", "/customers/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn test_update_customer_replaces_every_field() {
    let test_app = setup_test_app().await;

    request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({
            "name": "Acme",
            "email": "a@acme.com",
            "phone": "555-0100",
            "address": "1 Main St"
        })),
    )
    .await;

    // No phone/address in the replacement payload: full-replace semantics
    // must clear them, not merge.
    let (status, updated) = request(
        test_app.app.clone(),
        "PUT",
        "/customers/1",
        Some(json!({"name": "Acme Corp", "email": "sales@acme.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme Corp");
    assert_eq!(updated["email"], "sales@acme.com");
    assert!(updated["phone"].is_null());
    assert!(updated["address"].is_null());

    let (_status, fetched) = request(test_app.app, "GET", "/customers/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_missing_customer_returns_404() {
    let test_app = setup_test_app().await;

    let (status, body) = request(
        test_app.app,
        "PUT",
        "/customers/42",
        Some(json!({"name": "Ghost", "email": "g@ghost.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn test_update_to_duplicate_email_rejected() {
    let test_app = setup_test_app().await;

    request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({"name": "First", "email": "first@acme.com"})),
    )
    .await;
    request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({"name": "Second", "email": "second@acme.com"})),
    )
    .await;

    let (status, _body) = request(
        test_app.app,
        "PUT",
        "/customers/2",
        Some(json!({"name": "Second", "email": "first@acme.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_customer_then_get_returns_404() {
    let test_app = setup_test_app().await;

    request(
        test_app.app.clone(),
        "POST",
        "/customers/",
        Some(json!({"name": "Acme", "email": "a@acme.com"})),
    )
    .await;

    let (status, body) = request(test_app.app.clone(), "DELETE", "/customers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer deleted");

    let (status, _body) = request(test_app.app, "GET", "/customers/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_customer_returns_404() {
    let test_app = setup_test_app().await;

    let (status, body) = request(test_app.app, "DELETE", "/customers/7", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Customer not found");
}

#[tokio::test]
async fn test_list_customers_defaults_to_first_ten() {
    let test_app = setup_test_app().await;

    for i in 1..=12 {
        request(
            test_app.app.clone(),
            "POST",
            "/customers/",
            Some(json!({"name": format!("c{}", i), "email": format!("c{}@acme.com", i)})),
        )
        .await;
    }

    let (status, body) = request(test_app.app, "GET", "/customers/", None).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 10);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["id"], (i + 1) as i64);
    }
}

#[tokio::test]
async fn test_list_customers_skip_omits_first_n() {
    let test_app = setup_test_app().await;

    for i in 1..=12 {
        request(
            test_app.app.clone(),
            "POST",
            "/customers/",
            Some(json!({"name": format!("c{}", i), "email": format!("c{}@acme.com", i)})),
        )
        .await;
    }

    let (_status, body) = request(test_app.app, "GET", "/customers/?skip=10&limit=10", None).await;

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 11);
    assert_eq!(records[1]["id"], 12);
}

#[tokio::test]
async fn test_list_customers_skip_and_limit_window() {
    let test_app = setup_test_app().await;

    for i in 1..=6 {
        request(
            test_app.app.clone(),
            "POST",
            "/customers/",
            Some(json!({"name": format!("c{}", i), "email": format!("c{}@acme.com", i)})),
        )
        .await;
    }

    let (_status, body) = request(test_app.app, "GET", "/customers/?skip=2&limit=3", None).await;

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], 3);
    assert_eq!(records[2]["id"], 5);
}

#[tokio::test]
async fn test_list_customers_empty_database() {
    let test_app = setup_test_app().await;

    let (status, body) = request(test_app.app, "GET", "/customers/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
