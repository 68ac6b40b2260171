//! # PTO Calendar Backend
//!
//! Non-UI logic of the PTO calendar: the year-state engine, its local
//! persistence, the public holiday lookup and the REST API that exposes them.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (YearStateEngine, PtoService, CalendarService)
//!     ↓
//! Storage Layer (JSON records)      Holidays (Nager.Date client)
//! ```

pub mod config;
pub mod domain;
pub mod holidays;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{CalendarService, EngineSettings, PtoService};
use crate::holidays::{HolidayProvider, NagerHolidayProvider};
use crate::storage::{Connection, JsonConnection};

/// Year-state storage used by the running application
pub type AppYearStateStorage = <JsonConnection as Connection>::YearStateRepository;

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub pto_service: PtoService<AppYearStateStorage>,
    pub calendar_service: CalendarService,
    pub config: Arc<AppConfig>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let data_directory = config.resolve_data_directory()?;
    let connection = JsonConnection::new(&data_directory)?;
    info!("Storing year state in {}", connection.base_directory().display());
    let storage = Arc::new(connection.create_year_state_repository());

    info!("Setting up holiday provider for {}", config.holiday_country);
    let holiday_provider: Arc<dyn HolidayProvider> = Arc::new(
        NagerHolidayProvider::from_config(&config).context("Failed to create holiday client")?,
    );

    info!("Setting up domain model");
    let calendar_service = CalendarService::new();
    let pto_service = PtoService::start(
        EngineSettings::from_config(&config),
        storage,
        calendar_service.clone(),
        holiday_provider,
        config.initial_year(),
    )
    .await;

    Ok(AppState {
        pto_service,
        calendar_service,
        config: Arc::new(config),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = match app_state.config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!(
                "Ignoring invalid allowed origin '{}'",
                app_state.config.allowed_origin
            );
            CorsLayer::new()
        }
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT])
    .allow_headers(Any);

    Router::new()
        .nest("/api/pto", io::rest::pto_apis::router())
        .layer(cors)
        .with_state(app_state)
}
