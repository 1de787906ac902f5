//! # REST API for Donor Management
//!
//! Endpoints for listing, registering, updating and deleting donors.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::domain::commands::donors::DonorFilter;
use crate::io::rest::mappers::DonorMapper;
use crate::AppState;
use shared::{
    AddDonorRequest, AddDonorResponse, DonorListRequest, DonorListResponse, DonorStatsResponse,
    UpdateDonorRequest,
};

/// List donors, optionally filtered and sorted by location.
pub async fn list_donors(
    State(state): State<AppState>,
    Query(params): Query<DonorListRequest>,
) -> impl IntoResponse {
    info!("GET /api/donors - filters: {:?}", params);

    let filter = DonorFilter {
        blood_group: params.blood_group,
        district: params.district,
        division: params.division,
        verified_only: params.verified_only.unwrap_or(false),
        available_only: params.available_only.unwrap_or(false),
    };
    let sort_by_location = params.sort_by_location.unwrap_or(false);

    match state.donor_service.query_donors(&filter, sort_by_location) {
        Ok(donors) => {
            let donors: Vec<shared::Donor> =
                donors.into_iter().map(DonorMapper::to_dto).collect();
            let total = donors.len();
            (StatusCode::OK, Json(DonorListResponse { donors, total })).into_response()
        }
        Err(e) => {
            error!("Failed to list donors: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing donors").into_response()
        }
    }
}

/// Register a new donor.
pub async fn create_donor(
    State(state): State<AppState>,
    Json(request): Json<AddDonorRequest>,
) -> impl IntoResponse {
    info!("POST /api/donors - request: {:?}", request);

    let draft = DonorMapper::draft_from_request(request);
    match state.donor_service.add_new_donor(draft) {
        Ok(result) => {
            let status = if result.success { StatusCode::CREATED } else { StatusCode::BAD_REQUEST };
            let response = AddDonorResponse {
                success: result.success,
                message: result.message,
                donor: result.donor.map(DonorMapper::to_dto),
            };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to add donor: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error adding donor").into_response()
        }
    }
}

/// Update an existing donor.
pub async fn update_donor(
    State(state): State<AppState>,
    Path(donor_id): Path<String>,
    Json(request): Json<UpdateDonorRequest>,
) -> impl IntoResponse {
    info!("PUT /api/donors/{} - request: {:?}", donor_id, request);

    let patch = match DonorMapper::patch_from_request(request) {
        Ok(patch) => patch,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.donor_service.update_donor(&donor_id, patch) {
        Ok(Some(donor)) => (StatusCode::OK, Json(DonorMapper::to_dto(donor))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Donor not found").into_response(),
        Err(e) => {
            error!("Failed to update donor {}: {}", donor_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating donor").into_response()
        }
    }
}

/// Delete a donor.
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(donor_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/donors/{}", donor_id);

    match state.donor_service.delete_donor(&donor_id) {
        Ok(true) => (StatusCode::NO_CONTENT, "").into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Donor not found").into_response(),
        Err(e) => {
            error!("Failed to delete donor {}: {}", donor_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting donor").into_response()
        }
    }
}

/// Headline counts for the admin dashboard.
pub async fn donor_stats(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/donors/stats");

    match state.donor_service.donor_stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(DonorStatsResponse {
                total: stats.total,
                verified: stats.verified,
                available: stats.available,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to compute donor stats: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error computing stats").into_response()
        }
    }
}
