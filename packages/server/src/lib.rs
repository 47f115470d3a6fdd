#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for rights monitor analytics.
//!
//! Exposes the dashboard aggregations as JSON endpoints under
//! `/api/v1/analytics`. The record store is opened once at startup from
//! `RIGHTS_MONITOR_SNAPSHOT` and shared with every request.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use rights_monitor_store::{RecordStore, connect};

/// Shared application state.
pub struct AppState {
    /// Record store handle.
    pub store: Arc<dyn RecordStore>,
}

/// Listener settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`, default `8080`).
    pub port: u16,
}

impl ServerConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to defaults for missing or
    /// unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("BIND_ADDR").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn from_vars(bind_addr: Option<String>, port: Option<String>) -> Self {
        Self {
            bind_addr: bind_addr.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: port.and_then(|p| p.parse().ok()).unwrap_or(8080),
        }
    }
}

/// Registers the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .service(
                web::scope("/v1/analytics")
                    .route("", web::get().to(handlers::overview))
                    .route("/", web::get().to(handlers::overview))
                    .route("/violations", web::get().to(handlers::violations))
                    .route("/geodata", web::get().to(handlers::geodata))
                    .route("/timeline", web::get().to(handlers::timeline))
                    .route("/reports", web::get().to(handlers::reports)),
            ),
    );
}

/// Starts the rights monitor API server.
///
/// Opens the record store from the environment, then serves until shut
/// down. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the store can't be opened, or the
/// HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Opening record store...");
    let store = connect::connect_from_env()
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState {
        store: Arc::from(store),
    });

    let config = ServerConfig::from_env();
    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
