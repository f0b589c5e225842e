use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use image_labeler::services::catalog_service;
use image_labeler::web::{build_router, AppState};
use image_labeler::{database, startup, AppConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 2. Load configuration
    let config = Arc::new(AppConfig::from_env().expect("invalid configuration"));

    // 3. Connect to the database
    let options = config.connect_options().expect("invalid DATABASE_URL");
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("cannot connect to database");

    database::schema::ensure_schema(&pool)
        .await
        .expect("schema initialization failed");

    // 4. Refresh the image catalog (idempotent)
    catalog_service::populate(&pool, &config.image_source)
        .await
        .expect("image catalog population failed");
    let image_count = database::image_repo::count_images(&pool)
        .await
        .expect("image count failed");
    tracing::info!("image catalog holds {image_count} images");

    // 5. Build routes and serve
    let addr = config.bind_addr;
    let app = build_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("cannot bind listen address");
    println!("Survey server listening on http://{addr}");
    startup::print_access_banner(addr.port());

    axum::serve(listener, app).await.expect("server error");
}
