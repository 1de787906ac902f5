//! Donor service: the single entry point for reading and mutating the donor
//! collection. Validation, defaulting and id allocation happen here; the
//! repository underneath is a plain ordered collection.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Months, NaiveDate};
use tracing::{info, warn};

use crate::domain::commands::donors::{
    AddDonorResult, DonorDraft, DonorFilter, DonorPatch, DonorStats,
};
use crate::domain::models::donor::{
    can_donate_as_of, parse_donor_date, Donor,
};
use crate::domain::reference::find_division_for_district;
use crate::domain::validation::validate_donor;
use crate::storage::DonorStorage;
use shared::BloodGroup;

/// Placeholder stored when a donor registered without a contact number.
const CONTACT_PLACEHOLDER: &str = "+880XXXXXXXXXX";

/// Fallback district applied during defaulting (unreachable in practice,
/// since validation already requires a known district).
const DEFAULT_DISTRICT: &str = "Dhaka";

/// Service for managing donors in the directory.
#[derive(Clone)]
pub struct DonorService {
    repository: Arc<dyn DonorStorage>,
}

impl DonorService {
    /// Create a new DonorService over the given repository.
    pub fn new(repository: Arc<dyn DonorStorage>) -> Self {
        Self { repository }
    }

    /// Current full donor list, insertion order.
    pub fn list_donors(&self) -> Result<Vec<Donor>> {
        self.repository.list_donors()
    }

    /// Donors matching every set filter field, order preserved.
    pub fn filter_donors(&self, filter: &DonorFilter) -> Result<Vec<Donor>> {
        let mut donors = self.repository.list_donors()?;
        donors.retain(|donor| {
            if let Some(blood_group) = filter.blood_group.as_deref() {
                if donor.blood_group.as_str() != blood_group {
                    return false;
                }
            }
            if let Some(district) = filter.district.as_deref() {
                if donor.district != district {
                    return false;
                }
            }
            if let Some(division) = filter.division.as_deref() {
                if donor.division != division {
                    return false;
                }
            }
            if filter.verified_only && !donor.is_verified {
                return false;
            }
            if filter.available_only && !donor.can_donate {
                return false;
            }
            true
        });
        Ok(donors)
    }

    /// A copy of the donor list sorted ascending by (division, district).
    /// The sort is stable, so donors sharing a location keep their order.
    pub fn sorted_by_location(&self) -> Result<Vec<Donor>> {
        let mut donors = self.repository.list_donors()?;
        donors.sort_by(|a, b| {
            a.division.cmp(&b.division).then_with(|| a.district.cmp(&b.district))
        });
        Ok(donors)
    }

    /// Filtered listing with optional location ordering, the shape the
    /// directory pages ask for.
    pub fn query_donors(&self, filter: &DonorFilter, sort_by_location: bool) -> Result<Vec<Donor>> {
        let mut donors = self.filter_donors(filter)?;
        if sort_by_location {
            donors.sort_by(|a, b| {
                a.division.cmp(&b.division).then_with(|| a.district.cmp(&b.district))
            });
        }
        Ok(donors)
    }

    /// Headline counts for the admin dashboard.
    pub fn donor_stats(&self) -> Result<DonorStats> {
        let donors = self.repository.list_donors()?;
        Ok(DonorStats {
            total: donors.len(),
            verified: donors.iter().filter(|d| d.is_verified).count(),
            available: donors.iter().filter(|d| d.can_donate).count(),
        })
    }

    /// Validate a draft, fill defaults, allocate an id and append the donor.
    /// On validation failure the store is left untouched and the joined
    /// error messages come back on the result.
    pub fn add_new_donor(&self, draft: DonorDraft) -> Result<AddDonorResult> {
        self.add_new_donor_as_of(draft, Local::now().date_naive())
    }

    /// As [`add_new_donor`], with the reference date supplied by the caller
    /// so eligibility defaulting is testable.
    ///
    /// [`add_new_donor`]: DonorService::add_new_donor
    pub fn add_new_donor_as_of(&self, draft: DonorDraft, today: NaiveDate) -> Result<AddDonorResult> {
        let mut report = validate_donor(&draft);
        check_date_field(&draft.last_donation_date, "Last donation date", &mut report.errors);
        check_date_field(&draft.date_joined, "Date joined", &mut report.errors);

        if !report.errors.is_empty() {
            let message = format!("Validation failed: {}", report.errors.join(", "));
            warn!("Rejected donor registration: {}", message);
            return Ok(AddDonorResult { success: false, message, donor: None });
        }

        let district = non_empty(draft.district).unwrap_or_else(|| DEFAULT_DISTRICT.to_string());
        let division = non_empty(draft.division)
            .unwrap_or_else(|| find_division_for_district(&district).to_string());
        let last_donation_date = match draft.last_donation_date.as_deref() {
            Some(value) if !value.trim().is_empty() => {
                // Parse checked above.
                parse_donor_date(value).unwrap()
            }
            _ => today.checked_sub_months(Months::new(3)).unwrap(),
        };
        let date_joined = match draft.date_joined.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_donor_date(value).unwrap(),
            _ => today,
        };

        let donor = Donor {
            id: self.next_donor_id()?,
            name: draft.name.unwrap_or_default(),
            blood_group: draft
                .blood_group
                .as_deref()
                .and_then(|group| group.parse().ok())
                .unwrap_or(BloodGroup::OPositive),
            district,
            division,
            last_donation_date,
            contact_number: non_empty(draft.contact_number)
                .unwrap_or_else(|| CONTACT_PLACEHOLDER.to_string()),
            email: non_empty(draft.email),
            is_verified: draft.is_verified.unwrap_or(false),
            can_donate: draft
                .can_donate
                .unwrap_or_else(|| can_donate_as_of(last_donation_date, today)),
            donation_count: draft.donation_count.unwrap_or(0),
            date_joined,
            address: non_empty(draft.address),
            available_time_preference: draft
                .available_time_preference
                .or_else(|| Some(vec!["Any Time".to_string()])),
            medical_conditions: draft.medical_conditions,
        };

        info!("Registered donor {} ({})", donor.id, donor.name);
        let result = AddDonorResult {
            success: true,
            message: "Donor added successfully".to_string(),
            donor: Some(donor.clone()),
        };
        self.repository.add_donor(donor)?;
        Ok(result)
    }

    /// Append already-complete donors (bulk import path).
    pub fn add_donors(&self, donors: Vec<Donor>) -> Result<()> {
        info!("Appending {} donors to the store", donors.len());
        self.repository.add_donors(donors)
    }

    /// Replace the whole collection (JSON import path).
    pub fn replace_all(&self, donors: Vec<Donor>) -> Result<()> {
        info!("Replacing donor store with {} donors", donors.len());
        self.repository.replace_all(donors)
    }

    /// Shallow-merge `patch` into the donor with the given id. Returns the
    /// updated donor, or `None` when the id is unknown.
    pub fn update_donor(&self, donor_id: &str, patch: DonorPatch) -> Result<Option<Donor>> {
        let updated = self.repository.update_donor(donor_id, patch)?;
        match &updated {
            Some(donor) => info!("Updated donor {}", donor.id),
            None => warn!("Attempted to update unknown donor {}", donor_id),
        }
        Ok(updated)
    }

    /// Delete a donor by id. Returns whether a record was removed.
    pub fn delete_donor(&self, donor_id: &str) -> Result<bool> {
        let deleted = self.repository.delete_donor(donor_id)?;
        if deleted {
            info!("Deleted donor {}", donor_id);
        } else {
            warn!("Attempted to delete unknown donor {}", donor_id);
        }
        Ok(deleted)
    }

    /// Next free donor id: a max-scan over every parseable `D######`
    /// suffix, plus one. Unlike inspecting the last element, this cannot
    /// mint an id that is still present after deletes or reorderings.
    pub fn next_donor_id(&self) -> Result<String> {
        Ok(Donor::format_id(self.next_id_sequence()?))
    }

    /// First free id sequence number; bulk import reserves a run of ids
    /// starting here so id-less rows within one batch stay distinct.
    pub(crate) fn next_id_sequence(&self) -> Result<u32> {
        let donors = self.repository.list_donors()?;
        let max = donors.iter().filter_map(|donor| Donor::id_sequence(&donor.id)).max();
        Ok(max.unwrap_or(0) + 1)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_date_field(value: &Option<String>, label: &str, errors: &mut Vec<String>) {
    if let Some(value) = value.as_deref() {
        if !value.trim().is_empty() && parse_donor_date(value).is_none() {
            errors.push(format!("{} must use the DD MMM YYYY format", label));
        }
    }
}
