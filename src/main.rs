//! Libris Server - Library Management System
//!
//! A Rust REST API server for library management.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris_server::{
    api,
    auth::{self, TokenCodec},
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libris_server={},tower_http=debug", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Libris Server v{}", env!("CARGO_PKG_VERSION"));

    // The signing secret is mandatory; refuse to start without it
    let codec = TokenCodec::from_config(&config.auth).expect("Failed to initialize token codec");

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, codec.clone());

    // First-run admin account
    if !config.bootstrap.admin_password.is_empty() {
        services
            .users
            .bootstrap_admin(
                &config.bootstrap.admin_name,
                &config.bootstrap.admin_email,
                &config.bootstrap.admin_password,
            )
            .await
            .expect("Failed to bootstrap admin account");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        auth: codec,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        // Authenticated users
        .route("/users/me", get(api::users::me))
        .route("/users/me/borrows", get(api::users::my_borrows))
        // Public catalog
        .route("/books", get(api::books::list_books))
        .route("/books/:id", get(api::books::get_book))
        // Administration
        .route("/admin/users", post(api::admin::register_admin))
        .route("/admin/books", post(api::admin::create_book))
        .route("/admin/borrows", post(api::admin::create_borrow))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    // The authorization middleware sits on the outer router so it sees
    // full request paths, not nest-stripped ones
    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(middleware::from_fn_with_state(
            state,
            auth::middleware::authorize,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
