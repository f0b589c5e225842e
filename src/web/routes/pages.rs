use askama::Template;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde_json::{json, Value};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

pub async fn index_handler() -> impl IntoResponse {
    let template = IndexTemplate;
    Html(template.render().unwrap()).into_response()
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "build": env!("LABELER_BUILD_ID"),
    }))
}
