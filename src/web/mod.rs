pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{AppConfig, ImageSource};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { pool, config }
    }

    /// Fresh RNG per request; seeded runs replay the same draw.
    pub fn sample_rng(&self) -> SmallRng {
        match self.config.sample_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(routes::pages::index_handler))
        .route("/health", get(routes::pages::health_handler))
        .route(
            "/api/start_survey_session",
            post(routes::survey::start_survey_session_handler),
        )
        .route(
            "/api/submit_survey_label",
            post(routes::survey::submit_survey_label_handler),
        )
        .route(
            "/api/submit_demographics",
            post(routes::survey::submit_demographics_handler),
        );

    // Image bytes are only served in local mode; hosted catalogs carry a
    // full url per image and clients fetch the bucket directly.
    if let ImageSource::LocalDisk { dataset_path } = &state.config.image_source {
        let serve_images = SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        )
        .layer(ServeDir::new(dataset_path));
        app = app.nest_service("/images", serve_images);
    }

    app.layer(CatchPanicLayer::new()).with_state(state)
}
