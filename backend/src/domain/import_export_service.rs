//! Donor import/export: CSV and JSON codecs for the admin panel.
//!
//! CSV import appends valid rows to the store and collects per-row errors;
//! JSON import replaces the whole store. The two deliberately differ — see
//! the import functions for the exact contracts.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Writer};
use tracing::{info, warn};

use crate::domain::commands::donors::DonorDraft;
use crate::domain::commands::transfer::{CsvExport, CsvImportReport, JsonImportReport};
use crate::domain::donor_service::DonorService;
use crate::domain::models::donor::{format_donor_date, parse_donor_date, Donor};
use crate::domain::reference::find_division_for_district;
use crate::domain::validation::validate_donor;
use crate::io::rest::mappers::DonorMapper;
use shared::BloodGroup;

/// Export column order. Import matches columns by name, not position.
pub const CSV_HEADERS: [&str; 15] = [
    "ID",
    "Name",
    "Blood Group",
    "District",
    "Division",
    "Last Donation Date",
    "Contact Number",
    "Email",
    "Verified",
    "Can Donate",
    "Donation Count",
    "Date Joined",
    "Address",
    "Available Time",
    "Medical Conditions",
];

/// Reference file offered to admins before their first import. Static
/// content, not derived from the store.
const CSV_TEMPLATE: &str = "\
Name,Blood Group,District,Last Donation Date,Contact Number,Email,Verified,Donation Count
\"Ahmed Khan\",\"A+\",\"Dhaka\",\"15 Jan 2023\",\"+8801712345678\",\"ahmed.khan@example.com\",\"Yes\",\"3\"
\"Fatima Rahman\",\"O-\",\"Chittagong\",\"02 Mar 2023\",\"+8801812345678\",\"fatima.rahman@example.com\",\"No\",\"1\"
";

/// Positions of known columns in an uploaded file, resolved from the header
/// row by name.
struct ColumnMap {
    id: Option<usize>,
    name: Option<usize>,
    blood_group: Option<usize>,
    district: Option<usize>,
    division: Option<usize>,
    last_donation_date: Option<usize>,
    contact_number: Option<usize>,
    email: Option<usize>,
    verified: Option<usize>,
    can_donate: Option<usize>,
    donation_count: Option<usize>,
    date_joined: Option<usize>,
    address: Option<usize>,
    available_time: Option<usize>,
    medical_conditions: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: position("ID"),
            name: position("Name"),
            blood_group: position("Blood Group"),
            district: position("District"),
            division: position("Division"),
            last_donation_date: position("Last Donation Date"),
            contact_number: position("Contact Number"),
            email: position("Email"),
            verified: position("Verified"),
            can_donate: position("Can Donate"),
            donation_count: position("Donation Count"),
            date_joined: position("Date Joined"),
            address: position("Address"),
            available_time: position("Available Time"),
            medical_conditions: position("Medical Conditions"),
        }
    }

    fn has_required_columns(&self) -> bool {
        self.name.is_some() && self.blood_group.is_some() && self.district.is_some()
    }
}

/// Service handling donor import and export in both supported formats.
#[derive(Clone, Default)]
pub struct ImportExportService;

impl ImportExportService {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the full donor list to CSV in the fixed 15-column layout.
    /// Quoting/escaping is RFC 4180: fields containing commas or quotes are
    /// wrapped, inner quotes doubled. List fields are joined with ", " and
    /// booleans render as Yes/No.
    pub fn export_csv(&self, donor_service: &DonorService) -> Result<CsvExport> {
        let donors = donor_service.list_donors()?;
        let donor_count = donors.len();

        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for donor in donors {
            let last_donation = format_donor_date(donor.last_donation_date);
            let date_joined = format_donor_date(donor.date_joined);
            let donation_count = donor.donation_count.to_string();
            let available_time = join_list(&donor.available_time_preference);
            let medical_conditions = join_list(&donor.medical_conditions);
            writer.write_record([
                donor.id.as_str(),
                donor.name.as_str(),
                donor.blood_group.as_str(),
                donor.district.as_str(),
                donor.division.as_str(),
                last_donation.as_str(),
                donor.contact_number.as_str(),
                donor.email.as_deref().unwrap_or(""),
                yes_no(donor.is_verified),
                yes_no(donor.can_donate),
                donation_count.as_str(),
                date_joined.as_str(),
                donor.address.as_deref().unwrap_or(""),
                available_time.as_str(),
                medical_conditions.as_str(),
            ])?;
        }

        let csv_content = String::from_utf8(writer.into_inner()?)?;
        let filename = format!("donors_export_{}.csv", Local::now().format("%Y%m%d"));
        info!("Exported {} donors to CSV ({} bytes)", donor_count, csv_content.len());

        Ok(CsvExport { csv_content, filename, donor_count })
    }

    /// Parse uploaded CSV text and append the valid rows to the store.
    ///
    /// Columns are matched by header name in any order; only Name, Blood
    /// Group and District are mandatory — if any of them is missing the
    /// whole import aborts with a single error and the store is untouched.
    /// Row-level validation failures are collected as "Row N: <reasons>"
    /// and do not stop the batch.
    pub fn import_csv(&self, donor_service: &DonorService, csv_text: &str) -> Result<CsvImportReport> {
        self.import_csv_as_of(donor_service, csv_text, Local::now().date_naive())
    }

    /// As [`import_csv`], with the reference date for defaulting supplied
    /// by the caller.
    ///
    /// [`import_csv`]: ImportExportService::import_csv
    pub fn import_csv_as_of(
        &self,
        donor_service: &DonorService,
        csv_text: &str,
        today: NaiveDate,
    ) -> Result<CsvImportReport> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(csv_text.as_bytes());
        let columns = match reader.headers() {
            Ok(headers) => ColumnMap::from_headers(headers),
            Err(e) => {
                return Ok(CsvImportReport {
                    success: false,
                    message: format!("Failed to parse CSV: {}", e),
                    imported: 0,
                    errors: 1,
                    error_details: vec![e.to_string()],
                })
            }
        };

        if !columns.has_required_columns() {
            warn!("CSV import rejected: required columns missing");
            return Ok(CsvImportReport {
                success: false,
                message: "CSV format is invalid. Required columns: Name, Blood Group, District"
                    .to_string(),
                imported: 0,
                errors: 1,
                error_details: vec!["Missing required columns".to_string()],
            });
        }

        // Reserve ids for the whole batch up front; the store is only
        // touched once at the end.
        let mut next_sequence = donor_service.next_id_sequence()?;
        let mut parsed: Vec<Donor> = Vec::new();
        let mut error_details: Vec<String> = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let row_number = index + 1;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    error_details.push(format!("Error parsing row {}: {}", row_number, e));
                    continue;
                }
            };

            match self.parse_row(&record, &columns, today, &mut next_sequence) {
                Ok(donor) => parsed.push(donor),
                Err(reasons) => {
                    error_details.push(format!("Row {}: {}", row_number, reasons.join(", ")));
                }
            }
        }

        let imported = parsed.len();
        let errors = error_details.len();
        if !parsed.is_empty() {
            donor_service.add_donors(parsed)?;
        }

        info!("CSV import finished: {} imported, {} errors", imported, errors);
        Ok(CsvImportReport {
            success: imported > 0,
            message: format!("Imported {} donors. Encountered {} errors.", imported, errors),
            imported,
            errors,
            error_details,
        })
    }

    /// Build a complete donor from one CSV record, or the list of reasons
    /// the row was rejected.
    fn parse_row(
        &self,
        record: &StringRecord,
        columns: &ColumnMap,
        today: NaiveDate,
        next_sequence: &mut u32,
    ) -> Result<Donor, Vec<String>> {
        let field = |index: Option<usize>| -> Option<String> {
            index.and_then(|i| record.get(i)).map(str::to_string)
        };
        let non_empty = |index: Option<usize>| field(index).filter(|v| !v.trim().is_empty());

        let draft = DonorDraft {
            id: non_empty(columns.id),
            name: field(columns.name),
            blood_group: field(columns.blood_group),
            district: field(columns.district),
            division: non_empty(columns.division),
            last_donation_date: non_empty(columns.last_donation_date),
            contact_number: field(columns.contact_number),
            email: field(columns.email),
            is_verified: None,
            can_donate: None,
            donation_count: None,
            date_joined: non_empty(columns.date_joined),
            address: non_empty(columns.address),
            available_time_preference: None,
            medical_conditions: None,
        };

        let mut reasons = validate_donor(&draft).errors;
        let last_donation_date = match draft.last_donation_date.as_deref() {
            Some(value) => match parse_donor_date(value) {
                Some(date) => Some(date),
                None => {
                    reasons.push("Last donation date must use the DD MMM YYYY format".to_string());
                    None
                }
            },
            None => None,
        };
        let date_joined = match draft.date_joined.as_deref() {
            Some(value) => match parse_donor_date(value) {
                Some(date) => Some(date),
                None => {
                    reasons.push("Date joined must use the DD MMM YYYY format".to_string());
                    None
                }
            },
            None => None,
        };
        if !reasons.is_empty() {
            return Err(reasons);
        }

        let district = draft.district.unwrap_or_default();
        let id = draft.id.unwrap_or_else(|| {
            let id = Donor::format_id(*next_sequence);
            *next_sequence += 1;
            id
        });

        Ok(Donor {
            id,
            name: draft.name.unwrap_or_default(),
            blood_group: draft
                .blood_group
                .as_deref()
                .and_then(|group| group.parse().ok())
                .unwrap_or(BloodGroup::OPositive),
            division: draft
                .division
                .unwrap_or_else(|| find_division_for_district(&district).to_string()),
            district,
            last_donation_date: last_donation_date.unwrap_or(today),
            contact_number: non_empty(columns.contact_number)
                .unwrap_or_else(|| "+880XXXXXXXXXX".to_string()),
            email: non_empty(columns.email),
            is_verified: field(columns.verified)
                .map(|value| value.eq_ignore_ascii_case("yes"))
                .unwrap_or(false),
            // Unlike the registration path, rows with no Can Donate column
            // default to eligible rather than recomputing from the date.
            can_donate: match columns.can_donate {
                Some(_) => field(columns.can_donate)
                    .map(|value| value.eq_ignore_ascii_case("yes"))
                    .unwrap_or(false),
                None => true,
            },
            donation_count: field(columns.donation_count)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0),
            date_joined: date_joined.unwrap_or(today),
            address: non_empty(columns.address),
            available_time_preference: split_list(non_empty(columns.available_time)),
            medical_conditions: split_list(non_empty(columns.medical_conditions)),
        })
    }

    /// Pretty-printed JSON array of the full donor list.
    pub fn export_json(&self, donor_service: &DonorService) -> Result<String> {
        let donors: Vec<shared::Donor> = donor_service
            .list_donors()?
            .into_iter()
            .map(DonorMapper::to_dto)
            .collect();
        info!("Exported {} donors to JSON", donors.len());
        Ok(serde_json::to_string_pretty(&donors)?)
    }

    /// Parse uploaded JSON text and **replace** the donor store with its
    /// contents. The input must be a JSON array of donor objects; anything
    /// else fails with zero imports and no store mutation.
    pub fn import_json(&self, donor_service: &DonorService, json_text: &str) -> Result<JsonImportReport> {
        let fail = |message: String| {
            warn!("JSON import rejected: {}", message);
            Ok(JsonImportReport { success: false, message, imported: 0 })
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(value) => value,
            Err(e) => return fail(format!("Failed to parse JSON: {}", e)),
        };
        if !value.is_array() {
            return fail("JSON data is not an array of donors".to_string());
        }

        let dtos: Vec<shared::Donor> = match serde_json::from_value(value) {
            Ok(dtos) => dtos,
            Err(e) => return fail(format!("Failed to parse JSON: {}", e)),
        };

        let mut donors = Vec::with_capacity(dtos.len());
        for dto in dtos {
            match DonorMapper::to_domain(dto) {
                Ok(donor) => donors.push(donor),
                Err(e) => return fail(format!("Failed to parse JSON: {}", e)),
            }
        }

        let imported = donors.len();
        donor_service.replace_all(donors)?;
        info!("JSON import replaced the store with {} donors", imported);
        Ok(JsonImportReport {
            success: true,
            message: format!("Successfully imported {} donors", imported),
            imported,
        })
    }

    /// The static CSV template offered for download next to the import
    /// dialog.
    pub fn csv_template(&self) -> &'static str {
        CSV_TEMPLATE
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn join_list(values: &Option<Vec<String>>) -> String {
    values.as_ref().map(|list| list.join(", ")).unwrap_or_default()
}

fn split_list(value: Option<String>) -> Option<Vec<String>> {
    value.map(|joined| joined.split(", ").map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDonorRepository;
    use chrono::Duration;
    use std::sync::Arc;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn empty_service() -> DonorService {
        DonorService::new(Arc::new(MemoryDonorRepository::new()))
    }

    fn seeded_service(donors: Vec<Donor>) -> DonorService {
        DonorService::new(Arc::new(MemoryDonorRepository::with_seed(donors)))
    }

    fn donor(id: &str, name: &str) -> Donor {
        Donor {
            id: id.to_string(),
            name: name.to_string(),
            blood_group: BloodGroup::APositive,
            district: "Dhaka".to_string(),
            division: "Dhaka".to_string(),
            last_donation_date: fixed_today() - Duration::days(120),
            contact_number: "+8801712345678".to_string(),
            email: Some("donor@example.com".to_string()),
            is_verified: true,
            can_donate: true,
            donation_count: 3,
            date_joined: fixed_today() - Duration::days(400),
            address: Some("House 7, Road 3, Dhanmondi, Dhaka".to_string()),
            available_time_preference: Some(vec!["Morning".to_string(), "Evening".to_string()]),
            medical_conditions: None,
        }
    }

    #[test]
    fn csv_export_has_fixed_header_and_yes_no_booleans() {
        let service = seeded_service(vec![donor("D000001", "Ahmed Khan")]);
        let export = ImportExportService::new().export_csv(&service).unwrap();

        let mut lines = export.csv_content.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADERS.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("D000001,Ahmed Khan,A+,Dhaka,Dhaka,"));
        assert!(row.contains("Yes,Yes,3"));
        assert!(row.contains("\"Morning, Evening\""));
        assert_eq!(export.donor_count, 1);
        assert!(export.filename.starts_with("donors_export_"));
        assert!(export.filename.ends_with(".csv"));
    }

    #[test]
    fn csv_round_trip_preserves_all_field_values() {
        let mut quoted = donor("D000002", "Salma \"Poly\" Khatun");
        quoted.address = Some("Flat 2B, \"Green View\", Sylhet".to_string());
        quoted.email = None;
        let original = vec![donor("D000001", "Ahmed Khan"), quoted];

        let source = seeded_service(original.clone());
        let transfer = ImportExportService::new();
        let export = transfer.export_csv(&source).unwrap();

        let target = empty_service();
        let report = transfer
            .import_csv_as_of(&target, &export.csv_content, fixed_today())
            .unwrap();
        assert!(report.success, "errors: {:?}", report.error_details);
        assert_eq!(report.imported, 2);
        assert_eq!(report.errors, 0);

        let imported = target.list_donors().unwrap();
        // Exported files carry a can-donate column, so no defaulting kicks
        // in and the round trip is lossless (email comes back as absent).
        assert_eq!(imported, original);
    }

    #[test]
    fn csv_import_requires_name_blood_group_and_district_columns() {
        let service = seeded_service(vec![donor("D000001", "Ahmed Khan")]);
        let csv_text = "Name,District\nAhmed Khan,Dhaka\n";

        let report = ImportExportService::new().import_csv(&service, csv_text).unwrap();
        assert!(!report.success);
        assert_eq!(report.imported, 0);
        assert_eq!(report.errors, 1);
        assert!(report.message.contains("Required columns: Name, Blood Group, District"));
        assert_eq!(report.error_details, vec!["Missing required columns"]);
        // No store mutation on structural failure.
        assert_eq!(service.list_donors().unwrap().len(), 1);
    }

    #[test]
    fn csv_import_collects_row_errors_without_aborting_the_batch() {
        let service = empty_service();
        let csv_text = "\
Name,Blood Group,District
Ahmed Khan,A+,Dhaka
Fatima Rahman,O-,Chittagong
Bad Row,X+,Dhaka
Nusrat Jahan,B+,Sylhet
";

        let report = ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();
        assert!(report.success);
        assert_eq!(report.imported, 3);
        assert_eq!(report.errors, 1);
        assert_eq!(report.error_details.len(), 1);
        assert!(report.error_details[0].starts_with("Row 3:"));
        assert!(report.error_details[0].contains("Blood group must be valid"));

        assert_eq!(service.list_donors().unwrap().len(), 3);
    }

    #[test]
    fn csv_import_maps_columns_by_name_in_any_order() {
        let service = empty_service();
        let csv_text = "\
District,Name,Donation Count,Blood Group
Dhaka,Ahmed Khan,4,A+
";

        let report = ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();
        assert_eq!(report.imported, 1);

        let imported = &service.list_donors().unwrap()[0];
        assert_eq!(imported.name, "Ahmed Khan");
        assert_eq!(imported.blood_group, BloodGroup::APositive);
        assert_eq!(imported.donation_count, 4);
        assert_eq!(imported.division, "Dhaka");
    }

    #[test]
    fn csv_import_defaults_missing_optionals() {
        let service = empty_service();
        let csv_text = "Name,Blood Group,District\nAhmed Khan,A+,Dhaka\n";

        ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();

        let imported = &service.list_donors().unwrap()[0];
        assert_eq!(imported.id, "D000001");
        assert_eq!(imported.contact_number, "+880XXXXXXXXXX");
        assert_eq!(imported.email, None);
        assert!(!imported.is_verified);
        // No Can Donate column: rows default to eligible.
        assert!(imported.can_donate);
        assert_eq!(imported.last_donation_date, fixed_today());
        assert_eq!(imported.date_joined, fixed_today());
    }

    #[test]
    fn csv_import_with_blank_can_donate_value_is_not_eligible() {
        let service = empty_service();
        let csv_text = "Name,Blood Group,District,Can Donate\nAhmed Khan,A+,Dhaka,\n";

        ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();
        // Column present but blank reads as "not yes".
        assert!(!service.list_donors().unwrap()[0].can_donate);
    }

    #[test]
    fn csv_import_allocates_distinct_ids_for_id_less_rows() {
        let service = seeded_service(vec![donor("D000005", "Existing")]);
        let csv_text = "\
Name,Blood Group,District
Ahmed Khan,A+,Dhaka
Fatima Rahman,O-,Chittagong
";

        ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();

        let ids: Vec<String> =
            service.list_donors().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["D000005", "D000006", "D000007"]);
    }

    #[test]
    fn csv_import_handles_quoted_commas_and_escaped_quotes() {
        let service = empty_service();
        let csv_text = "\
Name,Blood Group,District,Address
\"Khan, Ahmed\",A+,Dhaka,\"House 7, Road 3, \"\"Green View\"\"\"
";

        let report = ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();
        assert_eq!(report.imported, 1, "errors: {:?}", report.error_details);

        let imported = &service.list_donors().unwrap()[0];
        assert_eq!(imported.name, "Khan, Ahmed");
        assert_eq!(imported.address.as_deref(), Some("House 7, Road 3, \"Green View\""));
    }

    #[test]
    fn csv_import_rejects_rows_with_bad_dates() {
        let service = empty_service();
        let csv_text = "\
Name,Blood Group,District,Last Donation Date
Ahmed Khan,A+,Dhaka,2023-01-15
";

        let report = ImportExportService::new()
            .import_csv_as_of(&service, csv_text, fixed_today())
            .unwrap();
        assert!(!report.success);
        assert_eq!(report.imported, 0);
        assert!(report.error_details[0].contains("Last donation date must use the DD MMM YYYY format"));
    }

    #[test]
    fn template_is_importable_as_is() {
        let service = empty_service();
        let transfer = ImportExportService::new();

        let report = transfer
            .import_csv_as_of(&service, transfer.csv_template(), fixed_today())
            .unwrap();
        assert!(report.success);
        assert_eq!(report.imported, 2);
        assert_eq!(report.errors, 0);

        let donors = service.list_donors().unwrap();
        assert_eq!(donors[0].name, "Ahmed Khan");
        assert_eq!(donors[1].blood_group, BloodGroup::ONegative);
        assert!(!donors[1].is_verified);
    }

    #[test]
    fn json_round_trip_replaces_the_store_in_order() {
        let original = vec![donor("D000001", "Ahmed Khan"), donor("D000002", "Fatima Rahman")];
        let source = seeded_service(original.clone());
        let transfer = ImportExportService::new();

        let json = transfer.export_json(&source).unwrap();
        assert!(json.starts_with('['));

        // Import into a service that already holds unrelated donors: JSON
        // import replaces rather than appends.
        let target = seeded_service(vec![donor("D000099", "Leftover")]);
        let report = transfer.import_json(&target, &json).unwrap();
        assert!(report.success);
        assert_eq!(report.imported, 2);
        assert_eq!(report.message, "Successfully imported 2 donors");

        assert_eq!(target.list_donors().unwrap(), original);
    }

    #[test]
    fn json_import_rejects_non_array_input() {
        let service = seeded_service(vec![donor("D000001", "Ahmed Khan")]);
        let report = ImportExportService::new().import_json(&service, "{}").unwrap();

        assert!(!report.success);
        assert_eq!(report.imported, 0);
        assert_eq!(report.message, "JSON data is not an array of donors");
        assert_eq!(service.list_donors().unwrap().len(), 1);
    }

    #[test]
    fn json_import_rejects_malformed_input() {
        let service = empty_service();
        let report = ImportExportService::new().import_json(&service, "not json").unwrap();
        assert!(!report.success);
        assert!(report.message.starts_with("Failed to parse JSON:"));
    }
}
