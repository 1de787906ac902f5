//! Synthetic donor generation.
//!
//! There is no durable storage by design; every process start seeds the
//! store with a fresh batch of plausible donor records so the directory is
//! never empty.

use chrono::{Duration, Local, NaiveDate};
use rand::prelude::*;
use tracing::info;

use crate::domain::models::donor::{can_donate_as_of, Donor};
use crate::domain::reference::{find_division_for_district, DISTRICTS};
use shared::BloodGroup;

/// Number of donors seeded at startup.
pub const SEED_DONOR_COUNT: usize = 50;

// Donation dates are drawn uniformly from the past six months, so roughly
// half the seed set is eligible to donate.
const MAX_DAYS_SINCE_DONATION: i64 = 182;

const FIRST_NAMES: [&str; 32] = [
    "Ahmed", "Mohammad", "Rahim", "Karim", "Jashim", "Faruk", "Rubel", "Nasir",
    "Fatima", "Nusrat", "Razia", "Samira", "Taslima", "Rashida", "Nargis", "Sabina",
    "Abdul", "Jamal", "Sohel", "Arif", "Masud", "Rafiq", "Habib", "Imran",
    "Ayesha", "Rahima", "Salma", "Nasreen", "Parvin", "Sumaiya", "Sultana", "Poly",
];

const LAST_NAMES: [&str; 32] = [
    "Khan", "Rahman", "Ahmed", "Hossain", "Islam", "Akter", "Begum", "Ali",
    "Miah", "Uddin", "Chowdhury", "Sarkar", "Roy", "Das", "Siddique", "Molla",
    "Sheikh", "Talukder", "Huq", "Mahmud", "Haque", "Khatun", "Alam", "Kazi",
    "Parveen", "Jahan", "Sultana", "Bhuiyan", "Rashid", "Karim", "Iqbal", "Aziz",
];

/// Generate `count` donors with sequential ids starting at D000001,
/// relative to the current local date.
pub fn generate_donors(count: usize) -> Vec<Donor> {
    let donors = generate_donors_as_of(count, Local::now().date_naive(), &mut rand::rng());
    info!("Generated {} seed donors", donors.len());
    donors
}

/// Deterministically-testable variant: the reference date and RNG are
/// supplied by the caller.
pub fn generate_donors_as_of<R: Rng + ?Sized>(
    count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<Donor> {
    (1..=count as u32).map(|sequence| random_donor(sequence, today, rng)).collect()
}

fn random_donor<R: Rng + ?Sized>(sequence: u32, today: NaiveDate, rng: &mut R) -> Donor {
    let first_name = FIRST_NAMES.choose(rng).unwrap();
    let last_name = LAST_NAMES.choose(rng).unwrap();
    let district = DISTRICTS.choose(rng).unwrap().to_string();
    let blood_group = *BloodGroup::ALL.choose(rng).unwrap();
    let last_donation_date = today - Duration::days(rng.random_range(0..=MAX_DAYS_SINCE_DONATION));
    let date_joined = today - Duration::days(rng.random_range(0..365));

    Donor {
        id: Donor::format_id(sequence),
        name: format!("{} {}", first_name, last_name),
        blood_group,
        division: find_division_for_district(&district).to_string(),
        district,
        last_donation_date,
        // Matches the shape of real submissions, which often include a
        // space after the country code and so fail the strict +880 pattern.
        contact_number: format!(
            "+880 {}{}{}",
            rng.random_range(1..=3),
            rng.random_range(0..10),
            rng.random_range(1_000_000..10_000_000)
        ),
        email: None,
        is_verified: rng.random_bool(0.7),
        can_donate: can_donate_as_of(last_donation_date, today),
        donation_count: rng.random_range(1..=10),
        date_joined,
        address: None,
        available_time_preference: None,
        medical_conditions: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::is_known_district;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn generates_the_requested_number_with_sequential_ids() {
        let donors = generate_donors_as_of(10, fixed_today(), &mut rand::rng());
        assert_eq!(donors.len(), 10);
        for (i, donor) in donors.iter().enumerate() {
            assert_eq!(donor.id, Donor::format_id(i as u32 + 1));
        }
    }

    #[test]
    fn generated_records_are_internally_consistent() {
        let today = fixed_today();
        for donor in generate_donors_as_of(100, today, &mut rand::rng()) {
            assert!(is_known_district(&donor.district));
            assert_eq!(donor.division, find_division_for_district(&donor.district));
            assert_eq!(donor.can_donate, can_donate_as_of(donor.last_donation_date, today));
            assert!((1..=10).contains(&donor.donation_count));
            assert!(donor.last_donation_date <= today);
            assert!(today - donor.last_donation_date <= Duration::days(MAX_DAYS_SINCE_DONATION));
            assert!(donor.name.split_whitespace().count() == 2);
            assert!(donor.contact_number.starts_with("+880 "));
        }
    }
}
