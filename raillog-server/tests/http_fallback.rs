//! End-to-end tests: the real router and provider clients against fake
//! upstream providers on ephemeral ports.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use raillog_server::canonical::ModelCanonicalizer;
use raillog_server::config::ProviderSettings;
use raillog_server::providers::{ProviderClient, ProviderClientConfig, ProviderSource};
use raillog_server::resolver::Resolver;
use raillog_server::trips::InMemoryTripStore;
use raillog_server::web::{AppState, USER_ID_HEADER, create_router};

/// Canned behaviour for a fake provider.
#[derive(Clone)]
enum Fake {
    Json(Value),
    Status(u16),
    Hang,
}

#[derive(Clone)]
struct FakeState {
    reply: Fake,
    calls: Arc<AtomicUsize>,
}

async fn reply(state: &FakeState) -> Result<Json<Value>, StatusCode> {
    state.calls.fetch_add(1, Ordering::SeqCst);
    match &state.reply {
        Fake::Json(body) => Ok(Json(body.clone())),
        Fake::Status(code) => Err(StatusCode::from_u16(*code).unwrap()),
        Fake::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(StatusCode::GATEWAY_TIMEOUT)
        }
    }
}

async fn schedule_handler(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    assert!(params.contains_key("trainNum"));
    assert!(params.contains_key("runDate"));
    reply(&state).await
}

async fn registry_handler(
    State(state): State<FakeState>,
    Path(number): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    assert!(!number.is_empty());
    reply(&state).await
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A fake provider; returns its base URL and call counter.
async fn fake_provider(reply: Fake) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = FakeState {
        reply,
        calls: calls.clone(),
    };
    let router = Router::new()
        .route("/trains", get(schedule_handler))
        .route("/train/:number", get(registry_handler))
        .with_state(state);
    (serve(router).await, calls)
}

/// A base URL nothing is listening on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Start the application against the given providers.
async fn spawn_app(primary: String, secondary: String) -> String {
    let settings = ProviderSettings::new()
        .with_primary_url(primary)
        .with_secondary_url(secondary)
        .with_timeout(5);

    let sources: Vec<Arc<dyn ProviderSource>> = settings
        .descriptors()
        .into_iter()
        .map(|d| {
            let config = ProviderClientConfig::new(d).with_timeout(settings.timeout_secs);
            Arc::new(ProviderClient::new(config).unwrap()) as Arc<dyn ProviderSource>
        })
        .collect();

    let resolver = Resolver::new(sources, ModelCanonicalizer::default())
        .with_attempt_timeout(Duration::from_millis(300));
    let state = AppState::new(resolver, InMemoryTripStore::new());
    serve(create_router(state)).await
}

async fn lookup(app: &str, train: &str, date: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(format!("{app}/api/rolling-stock"))
        .header(USER_ID_HEADER, "user-1")
        .query(&[("trainNumber", train), ("date", date)])
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn primary_result_used_directly() {
    let (primary, primary_calls) = fake_provider(Fake::Json(json!({
        "data": [
            { "runDate": "2024-05-01", "trainNum": "G1", "trainCode": "CRH380A + CRH380A" },
            { "runDate": "2024-05-02", "trainNum": "G1", "trainCode": "CR400AF-2018" }
        ]
    })))
    .await;
    let (secondary, secondary_calls) = fake_provider(Fake::Json(json!([]))).await;
    let app = spawn_app(primary, secondary).await;

    let response = lookup(&app, "g1", "2024-05-01").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "rollingStock": "CRH380A CRH380A" }));

    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn hanging_primary_falls_back_to_registry() {
    let (primary, _) = fake_provider(Fake::Hang).await;
    let (secondary, secondary_calls) = fake_provider(Fake::Json(json!([
        { "date": "2024-05-01", "emu_no": "cr400af20180001" },
        { "date": "2024-04-30", "emu_no": "CR400AF20180002" }
    ])))
    .await;
    let app = spawn_app(primary, secondary).await;

    let body: Value = lookup(&app, "G1", "2024-05-01").await.json().await.unwrap();
    assert_eq!(body, json!({ "rollingStock": "CR400AF-0001" }));
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn all_providers_unreachable_is_empty_success() {
    let app = spawn_app(dead_url().await, dead_url().await).await;

    let response = lookup(&app, "G1", "2024-05-01").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "rollingStock": "" }));
}

#[tokio::test]
async fn blank_train_number_rejected_without_calls() {
    let (primary, primary_calls) = fake_provider(Fake::Json(json!({ "data": [] }))).await;
    let (secondary, secondary_calls) = fake_provider(Fake::Json(json!([]))).await;
    let app = spawn_app(primary, secondary).await;

    let response = lookup(&app, "   ", "2024-05-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("train number"));

    assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn registry_status_propagated() {
    let (primary, _) = fake_provider(Fake::Status(500)).await;
    let (secondary, _) = fake_provider(Fake::Status(503)).await;
    let app = spawn_app(primary, secondary).await;

    let response = lookup(&app, "G1", "2024-05-01").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn missing_user_and_bad_date_rejected() {
    let app = spawn_app(dead_url().await, dead_url().await).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{app}/api/rolling-stock"))
        .query(&[("trainNumber", "G1"), ("date", "2024-05-01")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = lookup(&app, "G1", "01/05/2024").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trips_saved_and_listed_per_user() {
    let app = spawn_app(dead_url().await, dead_url().await).await;
    let client = reqwest::Client::new();

    for (number, date) in [("g1", "2024-05-01"), ("D3202", "2024-06-10")] {
        let response = client
            .post(format!("{app}/api/trips"))
            .header(USER_ID_HEADER, "alice")
            .json(&json!({
                "trainNumber": number,
                "travelDate": date,
                "fromStation": "Beijing South",
                "toStation": "Shanghai Hongqiao",
                "mileageKm": "1318",
                "price": "553.5"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = client
        .post(format!("{app}/api/trips"))
        .header(USER_ID_HEADER, "alice")
        .json(&json!({
            "trainNumber": "X99999",
            "travelDate": "2024-05-01",
            "fromStation": "A",
            "toStation": "B",
            "mileageKm": "10",
            "price": "10"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let trips: Vec<Value> = client
        .get(format!("{app}/api/trips"))
        .header(USER_ID_HEADER, "alice")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0]["trainNumber"], "D3202");
    assert_eq!(trips[1]["trainNumber"], "G1");
    assert_eq!(trips[1]["userId"], "alice");

    let others: Vec<Value> = client
        .get(format!("{app}/api/trips"))
        .header(USER_ID_HEADER, "bob")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(others.is_empty());
}
