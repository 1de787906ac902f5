//! # REST API for Blood Requests
//!
//! Endpoints for submitting a blood request and listing open requests.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::SubmitBloodRequestRequest;

/// List all blood requests, newest first.
pub async fn list_blood_requests(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/requests");

    match state.request_service.list_requests() {
        Ok(requests) => (StatusCode::OK, Json(requests)).into_response(),
        Err(e) => {
            error!("Failed to list blood requests: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing requests").into_response()
        }
    }
}

/// Submit a new blood request.
pub async fn submit_blood_request(
    State(state): State<AppState>,
    Json(request): Json<SubmitBloodRequestRequest>,
) -> impl IntoResponse {
    info!("POST /api/requests - request: {:?}", request);

    match state.request_service.submit_request(request) {
        Ok(response) => {
            let status = if response.success { StatusCode::CREATED } else { StatusCode::BAD_REQUEST };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to submit blood request: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error submitting request").into_response()
        }
    }
}
