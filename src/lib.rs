//! Library catalog server
//!
//! REST JSON API over a small book catalog: categories, books, authors and
//! the publications linking books to their authors. Every list supports
//! case-insensitive search, single-column sorting and pagination.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
