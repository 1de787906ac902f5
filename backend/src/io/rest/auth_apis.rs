//! # REST API for the Mock Auth Flow
//!
//! Login, registration, logout and session lookup. Credentials are the
//! hard-coded demo accounts; nothing here is a security boundary.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{LoginRequest, RegisterRequest};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - email: {}", request.email);

    match state.auth_service.login(request) {
        Ok(response) => {
            let status = if response.success { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error logging in").into_response()
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/register - email: {}", request.email);

    match state.auth_service.register(request) {
        Ok(response) => {
            let status = if response.success { StatusCode::CREATED } else { StatusCode::BAD_REQUEST };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("Registration failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error registering").into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    match state.auth_service.logout() {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Logout failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error logging out").into_response()
        }
    }
}

pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    match state.auth_service.current_session() {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => {
            error!("Failed to read session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading session").into_response()
        }
    }
}
