//! Black-box tests for the HTTP client and the catalog controller against an
//! in-process fake of the product service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::json;

use fincatalog::validation::{Field, ID_TAKEN_MESSAGE};
use fincatalog::{
    AssumeYes, Catalog, DeleteOutcome, Error, HttpProductApi, Product, ProductApi,
    ProductChanges, SelectionCache,
};

#[derive(Default)]
struct ServiceState {
    products: Vec<Product>,
    author_ids: Vec<Option<String>>,
    verification_author_ids: Vec<Option<String>>,
    created: usize,
    wrap_list: bool,
    fail_list: bool,
}

type Shared = Arc<Mutex<ServiceState>>;

fn author_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorid")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

async fn list(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.author_ids.push(author_id(&headers));
    if state.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "service down").into_response();
    }
    if state.wrap_list {
        Json(json!({ "data": state.products })).into_response()
    } else {
        Json(state.products.clone()).into_response()
    }
}

async fn verify(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<bool> {
    let mut state = state.lock().unwrap();
    state.verification_author_ids.push(author_id(&headers));
    let id = params.get("id").cloned().unwrap_or_default();
    Json(state.products.iter().any(|p| p.id == id))
}

async fn create(State(state): State<Shared>, Json(product): Json<Product>) -> Response {
    let mut state = state.lock().unwrap();
    state.created += 1;
    state.products.push(product.clone());
    Json(json!({ "message": "Product added successfully", "data": product })).into_response()
}

async fn update(State(state): State<Shared>, Json(product): Json<Product>) -> Response {
    let mut state = state.lock().unwrap();
    match state.products.iter_mut().find(|p| p.id == product.id) {
        Some(existing) => {
            *existing = product.clone();
            Json(json!({ "message": "Product updated successfully", "data": product }))
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not product found with that id").into_response(),
    }
}

async fn remove(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let id = params.get("id").cloned().unwrap_or_default();
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
        (StatusCode::NOT_FOUND, "Not product found with that id").into_response()
    } else {
        Json(json!({ "message": "Product removed successfully" })).into_response()
    }
}

struct TestServer {
    base_url: String,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(products: Vec<Product>) -> Self {
        let state: Shared = Arc::new(Mutex::new(ServiceState {
            products,
            ..ServiceState::default()
        }));

        let app = Router::new()
            .route(
                "/bp/products",
                get(list).post(create).put(update).delete(remove),
            )
            .route("/bp/products/verification", get(verify))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}/bp");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    fn api(&self) -> HttpProductApi {
        HttpProductApi::new(&self.base_url, "123456789")
    }

    fn catalog(&self) -> Catalog<HttpProductApi> {
        Catalog::new(self.api(), SelectionCache::open_in_memory().unwrap())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ServiceState) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 10, 16)
}

fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: "A financial product for testing".to_string(),
        logo: "https://example.com/logo.png".to_string(),
        date_release: date(2027, 1, 1),
        date_revision: date(2028, 1, 1),
    }
}

#[tokio::test]
async fn list_sends_author_header() {
    let srv = TestServer::spawn(vec![product("trj-crd", "Credit Card")]).await;

    let products = srv.api().list_products().await.unwrap();

    assert_eq!(products, vec![product("trj-crd", "Credit Card")]);
    let ids = srv.with_state(|s| s.author_ids.clone());
    assert_eq!(ids, vec![Some("123456789".to_string())]);
}

#[tokio::test]
async fn list_accepts_wrapped_envelope() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    srv.with_state(|s| s.wrap_list = true);

    let products = srv.api().list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "abc");
}

#[tokio::test]
async fn verification_omits_author_header() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    let api = srv.api();

    assert!(api.verify_id("abc").await.unwrap());
    assert!(!api.verify_id("zzz").await.unwrap());

    let ids = srv.with_state(|s| s.verification_author_ids.clone());
    assert_eq!(ids, vec![None, None]);
}

#[tokio::test]
async fn non_success_status_maps_to_api_status() {
    let srv = TestServer::spawn(Vec::new()).await;

    let err = srv
        .api()
        .update_product(&product("nope", "Missing product"))
        .await
        .unwrap_err();

    match err {
        Error::ApiStatus {
            operation,
            status,
            message,
        } => {
            assert_eq!(operation, "update product");
            assert_eq!(status, 404);
            assert_eq!(message, "Not product found with that id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn open_list_failure_yields_alert() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    let catalog = srv.catalog();
    catalog.open_list().await;

    srv.with_state(|s| s.fail_list = true);
    let view = catalog.open_list().await;

    assert!(view.products.is_empty());
    let alert = view.alert.unwrap();
    assert!(alert.starts_with("Could not load products"));
    assert!(alert.contains("500"));
    assert_eq!(catalog.cache().products().unwrap().len(), 1);
}

#[tokio::test]
async fn create_then_list() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    let catalog = srv.catalog();

    let created = catalog
        .create(product("new-1", "New Product"), today())
        .await
        .unwrap();
    assert_eq!(created, product("new-1", "New Product"));

    let view = catalog.open_list().await;
    assert!(view.alert.is_none());
    assert_eq!(view.products.len(), 2);
    assert_eq!(view.filtered("new").len(), 1);
}

#[tokio::test]
async fn create_rejects_existing_id_without_posting() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    let catalog = srv.catalog();

    let err = catalog
        .create(product("abc", "Another Savings"), today())
        .await
        .unwrap_err();

    match err {
        Error::Validation(errors) => {
            assert_eq!(errors.get(Field::Id), Some(ID_TAKEN_MESSAGE));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(srv.with_state(|s| s.created), 0);
}

#[tokio::test]
async fn select_edit_and_delete() {
    let srv = TestServer::spawn(vec![
        product("abc", "Savings"),
        product("def", "Credit Card"),
    ])
    .await;
    let catalog = srv.catalog();
    catalog.open_list().await;
    catalog.select("abc").unwrap();

    let updated = catalog
        .edit(
            ProductChanges {
                name: Some("Savings Plus".to_string()),
                ..ProductChanges::default()
            },
            today(),
        )
        .await
        .unwrap();
    assert_eq!(updated.id, "abc");
    assert_eq!(updated.name, "Savings Plus");
    assert_eq!(catalog.detail().unwrap().name, "Savings Plus");

    let outcome = catalog.delete_selected(&AssumeYes).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Deleted(ref p) if p.id == "abc"));

    assert!(catalog.cache().selected_id().unwrap().is_none());
    let remaining = srv.with_state(|s| s.products.clone());
    assert_eq!(remaining, vec![product("def", "Credit Card")]);
    assert_eq!(catalog.cache().products().unwrap(), remaining);
}

#[tokio::test]
async fn delete_missing_product_keeps_selection() {
    let srv = TestServer::spawn(vec![product("abc", "Savings")]).await;
    let catalog = srv.catalog();
    catalog.open_list().await;
    catalog.select("abc").unwrap();

    srv.with_state(|s| s.products.clear());
    let err = catalog.delete_selected(&AssumeYes).await.unwrap_err();

    assert!(matches!(err, Error::ApiStatus { status: 404, .. }));
    assert_eq!(catalog.cache().selected_id().unwrap().as_deref(), Some("abc"));
}
