//! Libris Library Management System
//!
//! A REST JSON API for a small library: book catalog, user registration
//! and login, borrowing records, and role-gated administration. Identity
//! is carried in signed bearer tokens; the `auth` module holds the token
//! codec, the identity extractor, the guard, and the edge middleware
//! enforcing the protected/admin route table.

use std::sync::Arc;

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Token codec constructed once at startup; owns the signing secret
    pub auth: auth::TokenCodec,
}
