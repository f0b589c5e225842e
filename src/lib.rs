pub mod config;
pub mod database;
pub mod dataset;
pub mod models;
pub mod services;
pub mod startup;
pub mod web;

pub use config::{AppConfig, ImageSource};
pub use web::{build_router, AppState};
