//! # REST API for User Preferences
//!
//! The selected district and language are read once by the UI at startup
//! and written back on change.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{PreferencesResponse, UpdatePreferencesRequest};

pub async fn get_preferences(State(state): State<AppState>) -> impl IntoResponse {
    match state.preference_store.load() {
        Ok(preferences) => (
            StatusCode::OK,
            Json(PreferencesResponse {
                selected_district: preferences.selected_district,
                language: preferences.language,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to load preferences: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading preferences").into_response()
        }
    }
}

pub async fn update_preferences(
    State(state): State<AppState>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> impl IntoResponse {
    info!("PUT /api/preferences - request: {:?}", request);

    let result = state.preference_store.update(|preferences| {
        if let Some(district) = request.selected_district {
            preferences.selected_district = Some(district);
        }
        if let Some(language) = request.language {
            preferences.language = language;
        }
    });

    match result {
        Ok(preferences) => (
            StatusCode::OK,
            Json(PreferencesResponse {
                selected_district: preferences.selected_district,
                language: preferences.language,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update preferences: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating preferences").into_response()
        }
    }
}
