//! # REST API for Reference Data
//!
//! Static lookup lists used by selection controls: districts, divisions and
//! blood groups, plus the nearby-district suggestion.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::domain::reference;
use shared::{BloodGroup, NearbyDistrictsResponse, ReferenceDataResponse};

pub async fn get_reference_data() -> impl IntoResponse {
    let response = ReferenceDataResponse {
        districts: reference::DISTRICTS.iter().map(|d| d.to_string()).collect(),
        divisions: reference::division_names().iter().map(|d| d.to_string()).collect(),
        blood_groups: BloodGroup::ALL.iter().map(|g| g.as_str().to_string()).collect(),
    };
    (StatusCode::OK, Json(response))
}

/// Other districts in the same division, for widening a donor search.
pub async fn get_nearby_districts(Path(district): Path<String>) -> impl IntoResponse {
    info!("GET /api/reference/nearby/{}", district);

    let nearby = reference::nearby_districts(&district)
        .into_iter()
        .map(|d| d.to_string())
        .collect();
    (StatusCode::OK, Json(NearbyDistrictsResponse { district, nearby }))
}
