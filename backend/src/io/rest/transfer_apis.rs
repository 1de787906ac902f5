//! # REST API for Donor Import/Export
//!
//! Admin-panel endpoints: CSV/JSON export of the directory, file imports,
//! and the static CSV template download.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CsvExportResponse, CsvImportResponse, JsonImportResponse};

/// Export all donors as CSV. Returns the file content plus a dated
/// filename for the download dialog.
pub async fn export_donors_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/donors/export/csv");

    match state.import_export_service.export_csv(&state.donor_service) {
        Ok(export) => (
            StatusCode::OK,
            Json(CsvExportResponse {
                csv_content: export.csv_content,
                filename: export.filename,
                donor_count: export.donor_count,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("CSV export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting donors").into_response()
        }
    }
}

/// Export all donors as a pretty-printed JSON array.
pub async fn export_donors_json(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/donors/export/json");

    match state.import_export_service.export_json(&state.donor_service) {
        Ok(json) => {
            ([(header::CONTENT_TYPE, "application/json")], json).into_response()
        }
        Err(e) => {
            error!("JSON export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting donors").into_response()
        }
    }
}

/// Import donors from uploaded CSV text. Valid rows are appended; row
/// errors are reported back without aborting the batch.
pub async fn import_donors_csv(
    State(state): State<AppState>,
    csv_text: String,
) -> impl IntoResponse {
    info!("POST /api/donors/import/csv ({} bytes)", csv_text.len());

    match state.import_export_service.import_csv(&state.donor_service, &csv_text) {
        Ok(report) => {
            let status = if report.success { StatusCode::OK } else { StatusCode::BAD_REQUEST };
            let response = CsvImportResponse {
                success: report.success,
                message: report.message,
                imported: report.imported,
                errors: report.errors,
                error_details: if report.error_details.is_empty() {
                    None
                } else {
                    Some(report.error_details)
                },
            };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("CSV import failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error importing donors").into_response()
        }
    }
}

/// Import donors from uploaded JSON text. Replaces the whole directory.
pub async fn import_donors_json(
    State(state): State<AppState>,
    json_text: String,
) -> impl IntoResponse {
    info!("POST /api/donors/import/json ({} bytes)", json_text.len());

    match state.import_export_service.import_json(&state.donor_service, &json_text) {
        Ok(report) => {
            let status = if report.success { StatusCode::OK } else { StatusCode::BAD_REQUEST };
            let response = JsonImportResponse {
                success: report.success,
                message: report.message,
                imported: report.imported,
            };
            (status, Json(response)).into_response()
        }
        Err(e) => {
            error!("JSON import failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error importing donors").into_response()
        }
    }
}

/// Download the static CSV template that documents the import format.
pub async fn download_csv_template(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/donors/template/csv");
    (
        [(header::CONTENT_TYPE, "text/csv")],
        state.import_export_service.csv_template(),
    )
}
