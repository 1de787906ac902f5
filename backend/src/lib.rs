//! # Blood-Connect Backend
//!
//! All non-UI logic for the blood-donor directory.
//!
//! The crate is layered the same way top to bottom regardless of entry
//! point:
//!
//! ```text
//! UI (local web frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, validation, codecs)
//!     ↓
//! Storage Layer (in-memory donor store, preference file)
//! ```
//!
//! Donor records are deliberately not durable: the store is reseeded with
//! generated data on every start. Only session/preference state (selected
//! district, language, the mock auth session) persists, in a small YAML
//! file.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::generator::{generate_donors, SEED_DONOR_COUNT};
use crate::domain::{AuthService, BloodRequestService, DonorService, ImportExportService};
use crate::storage::{MemoryDonorRepository, PreferenceStore};

/// Main application state that holds all services.
#[derive(Clone)]
pub struct AppState {
    pub donor_service: DonorService,
    pub import_export_service: ImportExportService,
    pub request_service: BloodRequestService,
    pub auth_service: AuthService,
    pub preference_store: PreferenceStore,
}

/// Initialize the backend with all required services: seed the donor store,
/// open the preference file, wire up the services.
pub fn initialize_backend() -> Result<AppState> {
    info!("Seeding donor directory with {} generated donors", SEED_DONOR_COUNT);
    let repository = Arc::new(MemoryDonorRepository::with_seed(generate_donors(SEED_DONOR_COUNT)));
    let donor_service = DonorService::new(repository);

    info!("Opening preference store");
    let preference_store = PreferenceStore::new_default()?;

    Ok(AppState {
        donor_service,
        import_export_service: ImportExportService::new(),
        request_service: BloodRequestService::new(),
        auth_service: AuthService::new(preference_store.clone()),
        preference_store,
    })
}

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/donors", get(io::rest::list_donors).post(io::rest::create_donor))
        .route("/donors/stats", get(io::rest::donor_stats))
        .route(
            "/donors/:id",
            put(io::rest::update_donor).delete(io::rest::delete_donor),
        )
        .route("/donors/export/csv", get(io::rest::export_donors_csv))
        .route("/donors/export/json", get(io::rest::export_donors_json))
        .route("/donors/import/csv", post(io::rest::import_donors_csv))
        .route("/donors/import/json", post(io::rest::import_donors_json))
        .route("/donors/template/csv", get(io::rest::download_csv_template))
        .route(
            "/requests",
            get(io::rest::list_blood_requests).post(io::rest::submit_blood_request),
        )
        .route("/auth/login", post(io::rest::login))
        .route("/auth/register", post(io::rest::register))
        .route("/auth/logout", post(io::rest::logout))
        .route("/auth/session", get(io::rest::get_session))
        .route(
            "/preferences",
            get(io::rest::get_preferences).put(io::rest::update_preferences),
        )
        .route("/reference", get(io::rest::get_reference_data))
        .route("/reference/nearby/:district", get(io::rest::get_nearby_districts));

    Router::new().nest("/api", api_routes).layer(cors).with_state(app_state)
}
