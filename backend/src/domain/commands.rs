//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod donors {
    use crate::domain::models::donor::Donor;
    use shared::BloodGroup;

    /// A candidate donor record before validation and defaulting. Every
    /// field is optional; enum-like fields stay raw strings so validation
    /// can report on them instead of failing at parse time.
    #[derive(Debug, Clone, Default)]
    pub struct DonorDraft {
        pub id: Option<String>,
        pub name: Option<String>,
        pub blood_group: Option<String>,
        pub district: Option<String>,
        pub division: Option<String>,
        /// "DD MMM YYYY" string, parsed during completion.
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

    /// Conjunctive filter over the donor list. Filter values are compared
    /// textually, so an unknown blood group or district simply matches
    /// nothing rather than erroring.
    #[derive(Debug, Clone, Default)]
    pub struct DonorFilter {
        pub blood_group: Option<String>,
        pub district: Option<String>,
        pub division: Option<String>,
        pub verified_only: bool,
        pub available_only: bool,
    }

    /// Result of attempting to register a new donor. `donor` is present iff
    /// `success` is true; on failure `message` carries the joined
    /// validation errors.
    #[derive(Debug, Clone)]
    pub struct AddDonorResult {
        pub success: bool,
        pub message: String,
        pub donor: Option<Donor>,
    }

    /// Partial update applied to an existing donor. `None` fields are left
    /// untouched. Note that changing `district` does not recompute
    /// `division`; the division is fixed at creation time.
    #[derive(Debug, Clone, Default)]
    pub struct DonorPatch {
        pub name: Option<String>,
        pub blood_group: Option<BloodGroup>,
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

    impl DonorPatch {
        /// Shallow-merge this patch into `donor`.
        pub fn apply(self, donor: &mut Donor) {
            if let Some(name) = self.name {
                donor.name = name;
            }
            if let Some(blood_group) = self.blood_group {
                donor.blood_group = blood_group;
            }
            if let Some(district) = self.district {
                donor.district = district;
            }
            if let Some(contact_number) = self.contact_number {
                donor.contact_number = contact_number;
            }
            if let Some(email) = self.email {
                donor.email = Some(email);
            }
            if let Some(is_verified) = self.is_verified {
                donor.is_verified = is_verified;
            }
            if let Some(can_donate) = self.can_donate {
                donor.can_donate = can_donate;
            }
            if let Some(donation_count) = self.donation_count {
                donor.donation_count = donation_count;
            }
            if let Some(address) = self.address {
                donor.address = Some(address);
            }
            if let Some(preference) = self.available_time_preference {
                donor.available_time_preference = Some(preference);
            }
            if let Some(conditions) = self.medical_conditions {
                donor.medical_conditions = Some(conditions);
            }
        }
    }

    /// Headline counts for the admin dashboard.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DonorStats {
        pub total: usize,
        pub verified: usize,
        pub available: usize,
    }
}

pub mod transfer {
    /// CSV export payload handed back to the caller for download.
    #[derive(Debug, Clone)]
    pub struct CsvExport {
        pub csv_content: String,
        pub filename: String,
        pub donor_count: usize,
    }

    /// Outcome of a CSV import. Per-row validation failures accumulate in
    /// `error_details` ("Row N: <reasons>") without aborting the batch;
    /// structural failures (missing required columns) abort with a single
    /// error and `imported == 0`.
    #[derive(Debug, Clone)]
    pub struct CsvImportReport {
        pub success: bool,
        pub message: String,
        pub imported: usize,
        pub errors: usize,
        pub error_details: Vec<String>,
    }

    /// Outcome of a JSON import. JSON import replaces the entire donor
    /// list; it never appends.
    #[derive(Debug, Clone)]
    pub struct JsonImportReport {
        pub success: bool,
        pub message: String,
        pub imported: usize,
    }
}

#[cfg(test)]
mod tests {
    use super::donors::DonorPatch;
    use crate::domain::models::donor::Donor;
    use chrono::NaiveDate;
    use shared::BloodGroup;

    fn sample_donor() -> Donor {
        Donor {
            id: "D000001".to_string(),
            name: "Ahmed Khan".to_string(),
            blood_group: BloodGroup::APositive,
            district: "Dhaka".to_string(),
            division: "Dhaka".to_string(),
            last_donation_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            contact_number: "+8801712345678".to_string(),
            email: None,
            is_verified: false,
            can_donate: true,
            donation_count: 2,
            date_joined: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            address: None,
            available_time_preference: None,
            medical_conditions: None,
        }
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut donor = sample_donor();
        let patch = DonorPatch {
            name: Some("Ahmed K. Khan".to_string()),
            donation_count: Some(3),
            ..Default::default()
        };

        patch.apply(&mut donor);

        assert_eq!(donor.name, "Ahmed K. Khan");
        assert_eq!(donor.donation_count, 3);
        assert_eq!(donor.blood_group, BloodGroup::APositive);
        assert_eq!(donor.district, "Dhaka");
    }

    #[test]
    fn patching_district_does_not_recompute_division() {
        let mut donor = sample_donor();
        let patch = DonorPatch {
            district: Some("Sylhet".to_string()),
            ..Default::default()
        };

        patch.apply(&mut donor);

        assert_eq!(donor.district, "Sylhet");
        // Division stays as it was at creation time.
        assert_eq!(donor.division, "Dhaka");
    }
}
