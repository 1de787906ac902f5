//! In-memory donor repository.
//!
//! The donor directory deliberately has no durable storage: the collection
//! lives in memory and is reseeded from generated data at startup. The
//! mutex exists because the REST layer shares one repository across
//! handlers; individual operations are short and synchronous.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::domain::commands::donors::DonorPatch;
use crate::domain::models::donor::Donor;
use crate::storage::traits::DonorStorage;

/// Shared in-memory donor collection.
#[derive(Clone, Default)]
pub struct MemoryDonorRepository {
    donors: Arc<Mutex<Vec<Donor>>>,
}

impl MemoryDonorRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `donors` (the startup seed).
    pub fn with_seed(donors: Vec<Donor>) -> Self {
        Self { donors: Arc::new(Mutex::new(donors)) }
    }
}

impl DonorStorage for MemoryDonorRepository {
    fn list_donors(&self) -> Result<Vec<Donor>> {
        let donors = self.donors.lock().unwrap();
        Ok(donors.clone())
    }

    fn add_donor(&self, donor: Donor) -> Result<()> {
        let mut donors = self.donors.lock().unwrap();
        donors.push(donor);
        Ok(())
    }

    fn add_donors(&self, new_donors: Vec<Donor>) -> Result<()> {
        let mut donors = self.donors.lock().unwrap();
        donors.extend(new_donors);
        Ok(())
    }

    fn update_donor(&self, donor_id: &str, patch: DonorPatch) -> Result<Option<Donor>> {
        let mut donors = self.donors.lock().unwrap();
        match donors.iter_mut().find(|donor| donor.id == donor_id) {
            Some(donor) => {
                patch.apply(donor);
                Ok(Some(donor.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_donor(&self, donor_id: &str) -> Result<bool> {
        let mut donors = self.donors.lock().unwrap();
        let before = donors.len();
        donors.retain(|donor| donor.id != donor_id);
        Ok(donors.len() < before)
    }

    fn replace_all(&self, new_donors: Vec<Donor>) -> Result<()> {
        let mut donors = self.donors.lock().unwrap();
        *donors = new_donors;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::BloodGroup;

    fn donor(id: &str, name: &str) -> Donor {
        Donor {
            id: id.to_string(),
            name: name.to_string(),
            blood_group: BloodGroup::OPositive,
            district: "Dhaka".to_string(),
            division: "Dhaka".to_string(),
            last_donation_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            contact_number: "+8801712345678".to_string(),
            email: None,
            is_verified: false,
            can_donate: true,
            donation_count: 0,
            date_joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            address: None,
            available_time_preference: None,
            medical_conditions: None,
        }
    }

    #[test]
    fn add_preserves_insertion_order() {
        let repo = MemoryDonorRepository::new();
        repo.add_donor(donor("D000001", "First")).unwrap();
        repo.add_donors(vec![donor("D000002", "Second"), donor("D000003", "Third")]).unwrap();

        let names: Vec<String> =
            repo.list_donors().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn add_does_not_enforce_id_uniqueness() {
        // Uniqueness is the id allocator's job, not the store's.
        let repo = MemoryDonorRepository::new();
        repo.add_donor(donor("D000001", "First")).unwrap();
        repo.add_donor(donor("D000001", "Duplicate")).unwrap();
        assert_eq!(repo.list_donors().unwrap().len(), 2);
    }

    #[test]
    fn update_merges_into_first_match() {
        let repo = MemoryDonorRepository::with_seed(vec![donor("D000001", "First")]);
        let patch = DonorPatch { donation_count: Some(7), ..Default::default() };

        let updated = repo.update_donor("D000001", patch).unwrap().unwrap();
        assert_eq!(updated.donation_count, 7);
        assert_eq!(repo.list_donors().unwrap()[0].donation_count, 7);
    }

    #[test]
    fn update_of_unknown_id_returns_none() {
        let repo = MemoryDonorRepository::new();
        let result = repo.update_donor("D999999", DonorPatch::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn delete_removes_all_matches_and_reports_outcome() {
        let repo = MemoryDonorRepository::with_seed(vec![
            donor("D000001", "First"),
            donor("D000001", "Shadow"),
            donor("D000002", "Second"),
        ]);

        assert!(repo.delete_donor("D000001").unwrap());
        let remaining = repo.list_donors().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "D000002");

        assert!(!repo.delete_donor("D000001").unwrap());
    }

    #[test]
    fn replace_all_overwrites_the_collection() {
        let repo = MemoryDonorRepository::with_seed(vec![donor("D000001", "First")]);
        repo.replace_all(vec![donor("D000009", "Nine")]).unwrap();

        let donors = repo.list_donors().unwrap();
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].id, "D000009");
    }
}
