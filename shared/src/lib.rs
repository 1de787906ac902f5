use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight ABO/Rh blood groups a donor can carry.
///
/// Serialized in the short clinical notation ("A+", "O-", ...) so the JSON
/// wire format matches exported donor files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups, in the display order used by selection lists.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or(())
    }
}

/// A donor record as it travels over the wire and through exported files.
///
/// Donor ID format: "D" followed by a zero-padded 6-digit sequence
/// (e.g. "D000042"). Dates are "DD MMM YYYY" strings ("15 Jan 2023").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub blood_group: BloodGroup,
    pub district: String,
    /// Administrative division, derived from the district at creation time.
    pub division: String,
    pub last_donation_date: String,
    pub contact_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_verified: bool,
    /// Whether at least 90 days have passed since the last donation,
    /// computed when the record was created or imported.
    pub can_donate: bool,
    pub donation_count: u32,
    pub date_joined: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_time_preference: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<Vec<String>>,
}

/// Request to register a new donor. Only name, blood group and district are
/// mandatory; everything else is defaulted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDonorRequest {
    pub name: Option<String>,
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub division: Option<String>,
    pub last_donation_date: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub is_verified: Option<bool>,
    pub can_donate: Option<bool>,
    pub donation_count: Option<u32>,
    pub date_joined: Option<String>,
    pub address: Option<String>,
    pub available_time_preference: Option<Vec<String>>,
    pub medical_conditions: Option<Vec<String>>,
}

/// Outcome of an add-donor call. `donor` is present iff `success` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDonorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor: Option<Donor>,
}

/// Partial update of an existing donor; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonorRequest {
    pub name: Option<String>,
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub is_verified: Option<bool>,
    pub can_donate: Option<bool>,
    pub donation_count: Option<u32>,
    pub address: Option<String>,
    pub available_time_preference: Option<Vec<String>>,
    pub medical_conditions: Option<Vec<String>>,
}

/// Filter parameters for listing donors. All filters are conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorListRequest {
    pub blood_group: Option<String>,
    pub district: Option<String>,
    pub division: Option<String>,
    pub verified_only: Option<bool>,
    pub available_only: Option<bool>,
    /// When true, results are sorted by (division, district).
    pub sort_by_location: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorListResponse {
    pub donors: Vec<Donor>,
    pub total: usize,
}

/// Headline counts shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorStatsResponse {
    pub total: usize,
    pub verified: usize,
    pub available: usize,
}

/// CSV export payload: the file content plus a suggested filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExportResponse {
    pub csv_content: String,
    pub filename: String,
    pub donor_count: usize,
}

/// Result of a CSV import. Per-row validation failures are collected in
/// `error_details` ("Row N: <reasons>") and do not abort the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvImportResponse {
    pub success: bool,
    pub message: String,
    pub imported: usize,
    pub errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<Vec<String>>,
}

/// Result of a JSON import. A JSON import replaces the whole donor list,
/// unlike CSV import which appends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonImportResponse {
    pub success: bool,
    pub message: String,
    pub imported: usize,
}

/// Urgency of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// A request for blood posted by a patient or relative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: String,
    pub name: String,
    pub contact_number: String,
    pub blood_group: BloodGroup,
    pub hospital: String,
    pub district: String,
    pub urgency_level: UrgencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    /// RFC 3339 timestamp of when the request was submitted.
    pub requested_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBloodRequestRequest {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub blood_group: Option<String>,
    pub hospital: Option<String>,
    pub district: Option<String>,
    pub urgency_level: Option<UrgencyLevel>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBloodRequestResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BloodRequest>,
}

/// Role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

/// An authenticated session as persisted in the preference file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<AuthSession>,
}

/// User preferences mirrored to the preference file on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub selected_district: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    pub selected_district: Option<String>,
    pub language: Option<String>,
}

/// Reference data for selection lists: districts, divisions, blood groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDataResponse {
    pub districts: Vec<String>,
    pub divisions: Vec<String>,
    pub blood_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDistrictsResponse {
    pub district: String,
    pub nearby: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blood_group_round_trips_through_display_and_from_str() {
        for group in BloodGroup::ALL {
            assert_eq!(group.as_str().parse::<BloodGroup>(), Ok(group));
        }
        assert!("X+".parse::<BloodGroup>().is_err());
        assert!("a+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn blood_group_serializes_in_clinical_notation() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodGroup::OPositive);
    }

    #[test]
    fn donor_serializes_with_camel_case_fields() {
        let donor = Donor {
            id: "D000001".to_string(),
            name: "Ahmed Khan".to_string(),
            blood_group: BloodGroup::APositive,
            district: "Dhaka".to_string(),
            division: "Dhaka".to_string(),
            last_donation_date: "15 Jan 2023".to_string(),
            contact_number: "+8801712345678".to_string(),
            email: None,
            is_verified: true,
            can_donate: true,
            donation_count: 3,
            date_joined: "01 Feb 2022".to_string(),
            address: None,
            available_time_preference: None,
            medical_conditions: None,
        };

        let json = serde_json::to_string(&donor).unwrap();
        assert!(json.contains("\"bloodGroup\":\"A+\""));
        assert!(json.contains("\"lastDonationDate\":\"15 Jan 2023\""));
        // Absent optionals are omitted entirely from exported files.
        assert!(!json.contains("email"));

        let back: Donor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, donor);
    }
}
