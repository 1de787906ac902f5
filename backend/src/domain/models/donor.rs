use chrono::NaiveDate;
use shared::BloodGroup;

/// Display format for donor-facing dates ("15 Jan 2023").
pub const DONOR_DATE_FORMAT: &str = "%d %b %Y";

/// Minimum days between donations before a donor is eligible again.
pub const DONATION_COOLDOWN_DAYS: i64 = 90;

/// Domain model for a registered donor.
///
/// Dates are real [`NaiveDate`]s here; the "DD MMM YYYY" string form exists
/// only at the DTO/CSV boundary. `division` is derived from `district` when
/// the record is created and is deliberately not recomputed on later edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub blood_group: BloodGroup,
    pub district: String,
    pub division: String,
    pub last_donation_date: NaiveDate,
    pub contact_number: String,
    pub email: Option<String>,
    pub is_verified: bool,
    /// Eligibility snapshot taken when the record was created or imported.
    pub can_donate: bool,
    pub donation_count: u32,
    pub date_joined: NaiveDate,
    pub address: Option<String>,
    pub available_time_preference: Option<Vec<String>>,
    pub medical_conditions: Option<Vec<String>>,
}

impl Donor {
    /// Render a donor id from its numeric sequence: 42 -> "D000042".
    pub fn format_id(sequence: u32) -> String {
        format!("D{:06}", sequence)
    }

    /// Parse the numeric sequence out of a donor id. Ids that do not follow
    /// the `D######` convention yield `None` and are skipped by the max-scan.
    pub fn id_sequence(id: &str) -> Option<u32> {
        id.strip_prefix('D')?.parse().ok()
    }
}

/// Format a date in the donor-facing "DD MMM YYYY" form.
pub fn format_donor_date(date: NaiveDate) -> String {
    date.format(DONOR_DATE_FORMAT).to_string()
}

/// Parse a "DD MMM YYYY" date string.
pub fn parse_donor_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DONOR_DATE_FORMAT).ok()
}

/// Whole days elapsed between the last donation and `today` (floored;
/// negative if the donation date lies in the future).
pub fn days_since_last_donation(last_donation: NaiveDate, today: NaiveDate) -> i64 {
    (today - last_donation).num_days()
}

/// A donor may donate again once at least 90 days have passed. Exactly 90
/// days counts as eligible.
pub fn can_donate_as_of(last_donation: NaiveDate, today: NaiveDate) -> bool {
    days_since_last_donation(last_donation, today) >= DONATION_COOLDOWN_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn id_format_round_trips() {
        assert_eq!(Donor::format_id(1), "D000001");
        assert_eq!(Donor::format_id(123456), "D123456");
        assert_eq!(Donor::id_sequence("D000042"), Some(42));
        assert_eq!(Donor::id_sequence("X000042"), None);
        assert_eq!(Donor::id_sequence("D00004x"), None);
    }

    #[test]
    fn date_format_round_trips() {
        let d = date(2023, 1, 15);
        assert_eq!(format_donor_date(d), "15 Jan 2023");
        assert_eq!(parse_donor_date("15 Jan 2023"), Some(d));
        assert_eq!(parse_donor_date(" 15 Jan 2023 "), Some(d));
        assert_eq!(parse_donor_date("2023-01-15"), None);
        assert_eq!(parse_donor_date("32 Jan 2023"), None);
    }

    #[test]
    fn eligibility_boundary_is_ninety_days() {
        let today = date(2024, 6, 1);
        let ninety_days_ago = today - chrono::Duration::days(90);
        let eightynine_days_ago = today - chrono::Duration::days(89);

        assert_eq!(days_since_last_donation(ninety_days_ago, today), 90);
        assert!(can_donate_as_of(ninety_days_ago, today));
        assert!(!can_donate_as_of(eightynine_days_ago, today));
    }

    #[test]
    fn future_donation_date_is_never_eligible() {
        let today = date(2024, 6, 1);
        let tomorrow = today + chrono::Duration::days(1);
        assert_eq!(days_since_last_donation(tomorrow, today), -1);
        assert!(!can_donate_as_of(tomorrow, today));
    }
}
