//! Conversions between the domain donor model and the wire DTOs in `shared`.
//!
//! Dates are `NaiveDate` in the domain and "DD MMM YYYY" strings on the
//! wire; the mapper owns that boundary.

use anyhow::{anyhow, Result};

use crate::domain::commands::donors::{DonorDraft, DonorPatch};
use crate::domain::models::donor::{format_donor_date, parse_donor_date, Donor};
use shared::{AddDonorRequest, UpdateDonorRequest};

pub struct DonorMapper;

impl DonorMapper {
    pub fn to_dto(donor: Donor) -> shared::Donor {
        shared::Donor {
            id: donor.id,
            name: donor.name,
            blood_group: donor.blood_group,
            district: donor.district,
            division: donor.division,
            last_donation_date: format_donor_date(donor.last_donation_date),
            contact_number: donor.contact_number,
            email: donor.email,
            is_verified: donor.is_verified,
            can_donate: donor.can_donate,
            donation_count: donor.donation_count,
            date_joined: format_donor_date(donor.date_joined),
            address: donor.address,
            available_time_preference: donor.available_time_preference,
            medical_conditions: donor.medical_conditions,
        }
    }

    pub fn to_domain(dto: shared::Donor) -> Result<Donor> {
        let last_donation_date = parse_donor_date(&dto.last_donation_date).ok_or_else(|| {
            anyhow!(
                "donor {} has invalid last donation date '{}'",
                dto.id,
                dto.last_donation_date
            )
        })?;
        let date_joined = parse_donor_date(&dto.date_joined)
            .ok_or_else(|| anyhow!("donor {} has invalid join date '{}'", dto.id, dto.date_joined))?;

        Ok(Donor {
            id: dto.id,
            name: dto.name,
            blood_group: dto.blood_group,
            district: dto.district,
            division: dto.division,
            last_donation_date,
            contact_number: dto.contact_number,
            email: dto.email,
            is_verified: dto.is_verified,
            can_donate: dto.can_donate,
            donation_count: dto.donation_count,
            date_joined,
            address: dto.address,
            available_time_preference: dto.available_time_preference,
            medical_conditions: dto.medical_conditions,
        })
    }

    pub fn draft_from_request(request: AddDonorRequest) -> DonorDraft {
        DonorDraft {
            id: None,
            name: request.name,
            blood_group: request.blood_group,
            district: request.district,
            division: request.division,
            last_donation_date: request.last_donation_date,
            contact_number: request.contact_number,
            email: request.email,
            is_verified: request.is_verified,
            can_donate: request.can_donate,
            donation_count: request.donation_count,
            date_joined: request.date_joined,
            address: request.address,
            available_time_preference: request.available_time_preference,
            medical_conditions: request.medical_conditions,
        }
    }

    pub fn patch_from_request(request: UpdateDonorRequest) -> Result<DonorPatch> {
        let blood_group = match request.blood_group.as_deref() {
            Some(raw) => Some(raw.parse().map_err(|_| {
                anyhow!("Blood group must be valid (A+, A-, B+, B-, AB+, AB-, O+, O-)")
            })?),
            None => None,
        };

        Ok(DonorPatch {
            name: request.name,
            blood_group,
            district: request.district,
            contact_number: request.contact_number,
            email: request.email,
            is_verified: request.is_verified,
            can_donate: request.can_donate,
            donation_count: request.donation_count,
            address: request.address,
            available_time_preference: request.available_time_preference,
            medical_conditions: request.medical_conditions,
        })
    }
}
