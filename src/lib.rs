//! Libris Library Catalog Server
//!
//! A Rust implementation of a small library-catalog web service: browse
//! books, manage records and cover images, post reviews, and organize
//! books into personal collections.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod sanitize;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
