//! Blood request intake.
//!
//! Requests for blood are held in memory alongside the donor directory and
//! vanish on restart, same as the donors themselves. The service seeds a
//! few open emergency requests so the home page has something to show.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use shared::{
    BloodGroup, BloodRequest, SubmitBloodRequestRequest, SubmitBloodRequestResponse, UrgencyLevel,
};

// Looser than the donor contact rule: country code optional, spaces allowed.
static REQUEST_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s]{10,15}$").expect("request phone regex"));

/// Service for submitting and listing blood requests.
#[derive(Clone)]
pub struct BloodRequestService {
    requests: Arc<Mutex<Vec<BloodRequest>>>,
}

impl BloodRequestService {
    /// Create the service pre-seeded with the standing emergency requests.
    pub fn new() -> Self {
        Self { requests: Arc::new(Mutex::new(seed_requests())) }
    }

    /// All requests, newest first.
    pub fn list_requests(&self) -> Result<Vec<BloodRequest>> {
        let requests = self.requests.lock().unwrap();
        let mut listed = requests.clone();
        listed.reverse();
        Ok(listed)
    }

    /// Validate and record a new blood request. Validation here is
    /// form-level: the first failing rule becomes the response message.
    pub fn submit_request(
        &self,
        request: SubmitBloodRequestRequest,
    ) -> Result<SubmitBloodRequestResponse> {
        if let Some(message) = validate_request(&request) {
            warn!("Rejected blood request: {}", message);
            return Ok(SubmitBloodRequestResponse { success: false, message, request: None });
        }

        let now_millis =
            SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let blood_request = BloodRequest {
            id: format!("request::{}", now_millis),
            name: request.name.unwrap_or_default(),
            contact_number: request.contact_number.unwrap_or_default(),
            // Validated above.
            blood_group: request.blood_group.unwrap().parse().unwrap(),
            hospital: request.hospital.unwrap_or_default(),
            district: request.district.unwrap_or_default(),
            urgency_level: request.urgency_level.unwrap_or(UrgencyLevel::Medium),
            additional_info: request.additional_info.filter(|info| !info.trim().is_empty()),
            requested_at: Utc::now().to_rfc3339(),
        };

        info!(
            "Recorded blood request {} for {} at {}",
            blood_request.id, blood_request.blood_group, blood_request.hospital
        );
        self.requests.lock().unwrap().push(blood_request.clone());

        Ok(SubmitBloodRequestResponse {
            success: true,
            message: "Your blood request has been submitted successfully. Donors will be notified."
                .to_string(),
            request: Some(blood_request),
        })
    }
}

impl Default for BloodRequestService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_request(request: &SubmitBloodRequestRequest) -> Option<String> {
    let required: [(&Option<String>, &str); 5] = [
        (&request.name, "Name"),
        (&request.contact_number, "Contact Number"),
        (&request.blood_group, "Blood Group"),
        (&request.hospital, "Hospital"),
        (&request.district, "District"),
    ];
    for (value, label) in required {
        if value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true) {
            return Some(format!("{} is required", label));
        }
    }

    let contact = request.contact_number.as_deref().unwrap();
    if !REQUEST_PHONE_RE.is_match(contact) {
        return Some("Please enter a valid contact number".to_string());
    }

    let blood_group = request.blood_group.as_deref().unwrap();
    if blood_group.parse::<BloodGroup>().is_err() {
        return Some("Blood group must be valid (A+, A-, B+, B-, AB+, AB-, O+, O-)".to_string());
    }

    None
}

fn seed_requests() -> Vec<BloodRequest> {
    let now = Utc::now().to_rfc3339();
    vec![
        BloodRequest {
            id: "request::seed-1".to_string(),
            name: "Jahangir Alam".to_string(),
            blood_group: BloodGroup::OPositive,
            hospital: "Dhaka Medical College".to_string(),
            district: "Dhaka".to_string(),
            contact_number: "+880 1712 345678".to_string(),
            urgency_level: UrgencyLevel::High,
            additional_info: None,
            requested_at: now.clone(),
        },
        BloodRequest {
            id: "request::seed-2".to_string(),
            name: "Sadia Rahman".to_string(),
            blood_group: BloodGroup::BNegative,
            hospital: "Square Hospital".to_string(),
            district: "Dhaka".to_string(),
            contact_number: "+880 1812 345678".to_string(),
            urgency_level: UrgencyLevel::Critical,
            additional_info: None,
            requested_at: now.clone(),
        },
        BloodRequest {
            id: "request::seed-3".to_string(),
            name: "Kamal Hossain".to_string(),
            blood_group: BloodGroup::AbPositive,
            hospital: "Chittagong Medical College".to_string(),
            district: "Chittagong".to_string(),
            contact_number: "+880 1912 345678".to_string(),
            urgency_level: UrgencyLevel::Medium,
            additional_info: None,
            requested_at: now,
        },
    ]
}
