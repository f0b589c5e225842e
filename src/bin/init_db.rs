use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

use image_labeler::services::catalog_service;
use image_labeler::{database, AppConfig};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Arc::new(AppConfig::from_env().expect("invalid configuration"));
    let options = config.connect_options().expect("invalid DATABASE_URL");
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("cannot connect to database");

    println!("Creating database tables...");
    database::schema::ensure_schema(&pool)
        .await
        .expect("schema initialization failed");

    println!("Populating images...");
    match catalog_service::populate(&pool, &config.image_source).await {
        Ok(report) => {
            println!(
                "catalog populate: inserted={}, updated={}, skipped={}",
                report.inserted, report.updated, report.skipped
            );
        }
        Err(e) => {
            eprintln!("catalog populate failed: {}", e);
            std::process::exit(1);
        }
    }

    println!("Database initialization finished.");
}
