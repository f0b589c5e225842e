//! Integration tests for the survey HTTP surface.
//!
//! Each test builds the real router over a fresh in-memory SQLite pool and
//! drives it with `oneshot` requests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

use image_labeler::database::{image_repo, label_repo, participant_repo, schema};
use image_labeler::{build_router, AppConfig, AppState, ImageSource};

async fn setup_pool() -> SqlitePool {
    // One connection, otherwise every pooled connection gets its own
    // private in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    schema::ensure_schema(&pool).await.expect("schema");
    pool
}

fn test_config(sample_seed: Option<u64>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        image_source: ImageSource::HostedBucket {
            manifest_path: PathBuf::from("unused.txt"),
            base_url: "https://x.example".to_string(),
        },
        sample_seed,
    })
}

fn setup_app(pool: SqlitePool) -> axum::Router {
    build_router(AppState::new(pool, test_config(Some(7))))
}

async fn seed_images(pool: &SqlitePool, male: usize, female: usize) {
    for i in 0..male {
        image_repo::insert_image(pool, &format!("male/{i:05}.png"), "male", None)
            .await
            .unwrap();
    }
    for i in 0..female {
        image_repo::insert_image(pool, &format!("female/{i:05}.png"), "female", None)
            .await
            .unwrap();
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn count_participants(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM participants")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// start_survey_session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_session_creates_one_participant_and_a_balanced_sample() {
    let pool = setup_pool().await;
    seed_images(&pool, 25, 25).await;
    let app = setup_app(pool.clone());

    let response = app
        .oneshot(post_empty("/api/start_survey_session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["participant_id"], 1);
    assert_eq!(count_participants(&pool).await, 1);

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 20);
    assert!(images[..10].iter().all(|i| i["gender"] == "male"));
    assert!(images[10..].iter().all(|i| i["gender"] == "female"));

    // Draw is without replacement.
    let mut ids: Vec<i64> = images.iter().map(|i| i["id"].as_i64().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn start_session_with_a_short_catalog_returns_what_exists() {
    let pool = setup_pool().await;
    seed_images(&pool, 12, 3).await;
    let app = setup_app(pool.clone());

    let response = app
        .oneshot(post_empty("/api/start_survey_session"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 13);
    assert!(images[..10].iter().all(|i| i["gender"] == "male"));
    assert!(images[10..].iter().all(|i| i["gender"] == "female"));
}

#[tokio::test]
async fn start_session_with_an_empty_catalog_still_creates_a_participant() {
    let pool = setup_pool().await;
    let app = setup_app(pool.clone());

    let response = app
        .oneshot(post_empty("/api/start_survey_session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["images"].as_array().unwrap().len(), 0);
    assert_eq!(count_participants(&pool).await, 1);
}

#[tokio::test]
async fn seeded_sampling_replays_the_same_draw() {
    let pool = setup_pool().await;
    seed_images(&pool, 40, 40).await;
    let app = setup_app(pool.clone());

    let first = extract_json(
        app.clone()
            .oneshot(post_empty("/api/start_survey_session"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let second = extract_json(
        app.oneshot(post_empty("/api/start_survey_session"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    assert_eq!(first["images"], second["images"]);
    assert_ne!(first["participant_id"], second["participant_id"]);
}

// ---------------------------------------------------------------------------
// submit_survey_label
// ---------------------------------------------------------------------------

async fn setup_labeling() -> (SqlitePool, axum::Router, i64, i64) {
    let pool = setup_pool().await;
    let participant_id = participant_repo::insert_participant(&pool).await.unwrap();
    let image_id = image_repo::insert_image(&pool, "male/00001.png", "male", None)
        .await
        .unwrap();
    let app = setup_app(pool.clone());
    (pool, app, participant_id, image_id)
}

#[tokio::test]
async fn submit_label_writes_a_row_and_acknowledges() {
    let (pool, app, participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": image_id, "rating": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(label_repo::count_labels(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn rating_zero_is_a_valid_rating() {
    let (pool, app, participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": image_id, "rating": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        label_repo::count_labels_for_image(&pool, image_id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn rating_out_of_range_is_rejected() {
    let (pool, app, participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": image_id, "rating": 6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "rating_out_of_range");
    assert_eq!(label_repo::count_labels(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_participant_writes_no_label() {
    let (pool, app, _participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": 999, "image_id": image_id, "rating": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "participant_not_found");
    assert_eq!(label_repo::count_labels(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_image_writes_no_label() {
    let (pool, app, participant_id, _image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": 999, "rating": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "image_not_found");
    assert_eq!(label_repo::count_labels(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn missing_rating_is_a_bad_request() {
    let (pool, app, participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": image_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "missing_field");
    assert_eq!(body["field"], "rating");
    assert_eq!(label_repo::count_labels(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn null_rating_counts_as_missing() {
    let (_pool, app, participant_id, image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_survey_label",
            json!({ "participant_id": participant_id, "image_id": image_id, "rating": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// submit_demographics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demographics_update_the_participant_row() {
    let (pool, app, participant_id, _image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_demographics",
            json!({ "participant_id": participant_id, "age": 34, "gender": "female" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = participant_repo::find_participant(&pool, participant_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.age, Some(34));
    assert_eq!(row.gender.as_deref(), Some("female"));
}

#[tokio::test]
async fn demographics_accept_age_as_a_numeric_string() {
    let (pool, app, participant_id, _image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_demographics",
            json!({ "participant_id": participant_id, "age": "42" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = participant_repo::find_participant(&pool, participant_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.age, Some(42));
}

#[tokio::test]
async fn non_integer_age_leaves_the_participant_unchanged() {
    let (pool, app, participant_id, _image_id) = setup_labeling().await;

    let response = app
        .oneshot(post_json(
            "/api/submit_demographics",
            json!({ "participant_id": participant_id, "age": "young", "gender": "male" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid_age");

    let row = participant_repo::find_participant(&pool, participant_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.age, None);
    assert_eq!(row.gender, None);
}

#[tokio::test]
async fn demographics_for_an_unknown_participant_are_rejected() {
    let pool = setup_pool().await;
    let app = setup_app(pool);

    let response = app
        .oneshot(post_json(
            "/api/submit_demographics",
            json!({ "participant_id": 1, "age": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "participant_not_found");
}

#[tokio::test]
async fn demographics_without_a_participant_id_are_a_bad_request() {
    let pool = setup_pool().await;
    let app = setup_app(pool);

    let response = app
        .oneshot(post_json("/api/submit_demographics", json!({ "age": 30 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "missing_field");
    assert_eq!(body["field"], "participant_id");
}

// ---------------------------------------------------------------------------
// health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let pool = setup_pool().await;
    let app = setup_app(pool);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
}
