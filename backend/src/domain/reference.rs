//! Static reference data: the Bangladesh district list and the fixed
//! district-to-division grouping used to derive a donor's division.

/// Districts of Bangladesh, alphabetical. Candidate donor records must name
/// one of these.
pub const DISTRICTS: [&str; 65] = [
    "Bagerhat",
    "Bandarban",
    "Barguna",
    "Barisal",
    "Bhola",
    "Bogra",
    "Brahmanbaria",
    "Chandpur",
    "Chapainawabganj",
    "Chittagong",
    "Chuadanga",
    "Comilla",
    "Cox's Bazar",
    "Dhaka",
    "Dinajpur",
    "Faridpur",
    "Feni",
    "Gaibandha",
    "Gazipur",
    "Gopalganj",
    "Habiganj",
    "Jamalpur",
    "Jessore",
    "Jhalokati",
    "Jhenaidah",
    "Joypurhat",
    "Khagrachari",
    "Khulna",
    "Kishoreganj",
    "Kurigram",
    "Kushtia",
    "Lakshmipur",
    "Lalmonirhat",
    "Madaripur",
    "Magura",
    "Manikganj",
    "Meherpur",
    "Moulvibazar",
    "Munshiganj",
    "Mymensingh",
    "Naogaon",
    "Narail",
    "Narayanganj",
    "Narsingdi",
    "Natore",
    "Nawabganj",
    "Netrakona",
    "Nilphamari",
    "Noakhali",
    "Pabna",
    "Panchagarh",
    "Patuakhali",
    "Pirojpur",
    "Rajbari",
    "Rajshahi",
    "Rangamati",
    "Rangpur",
    "Satkhira",
    "Shariatpur",
    "Sherpur",
    "Sirajganj",
    "Sunamganj",
    "Sylhet",
    "Tangail",
    "Thakurgaon",
];

/// Districts grouped by administrative division. The first district in each
/// group is the division seat.
pub const DIVISION_DISTRICTS: [(&str, &[&str]); 8] = [
    (
        "Dhaka",
        &[
            "Dhaka",
            "Faridpur",
            "Gazipur",
            "Gopalganj",
            "Kishoreganj",
            "Madaripur",
            "Manikganj",
            "Munshiganj",
            "Narayanganj",
            "Narsingdi",
            "Rajbari",
            "Shariatpur",
            "Tangail",
        ],
    ),
    (
        "Chittagong",
        &[
            "Chittagong",
            "Bandarban",
            "Brahmanbaria",
            "Chandpur",
            "Comilla",
            "Cox's Bazar",
            "Feni",
            "Khagrachari",
            "Lakshmipur",
            "Noakhali",
            "Rangamati",
        ],
    ),
    (
        "Khulna",
        &[
            "Khulna",
            "Bagerhat",
            "Chuadanga",
            "Jessore",
            "Jhenaidah",
            "Kushtia",
            "Magura",
            "Meherpur",
            "Narail",
            "Satkhira",
        ],
    ),
    (
        "Rajshahi",
        &[
            "Rajshahi",
            "Bogra",
            "Chapainawabganj",
            "Joypurhat",
            "Naogaon",
            "Natore",
            "Nawabganj",
            "Pabna",
            "Sirajganj",
        ],
    ),
    (
        "Barisal",
        &["Barisal", "Barguna", "Bhola", "Jhalokati", "Patuakhali", "Pirojpur"],
    ),
    ("Sylhet", &["Sylhet", "Habiganj", "Moulvibazar", "Sunamganj"]),
    (
        "Rangpur",
        &[
            "Rangpur",
            "Dinajpur",
            "Gaibandha",
            "Kurigram",
            "Lalmonirhat",
            "Nilphamari",
            "Panchagarh",
            "Thakurgaon",
        ],
    ),
    ("Mymensingh", &["Mymensingh", "Jamalpur", "Netrakona", "Sherpur"]),
];

/// Division label used when a district is not in the lookup table.
pub const UNKNOWN_DIVISION: &str = "Unknown";

pub fn is_known_district(district: &str) -> bool {
    DISTRICTS.contains(&district)
}

/// Find the division a district belongs to. Linear scan of the fixed table;
/// returns [`UNKNOWN_DIVISION`] when the district is not listed.
pub fn find_division_for_district(district: &str) -> &'static str {
    for (division, districts) in DIVISION_DISTRICTS {
        if districts.contains(&district) {
            return division;
        }
    }
    UNKNOWN_DIVISION
}

/// Names of all divisions, in table order.
pub fn division_names() -> Vec<&'static str> {
    DIVISION_DISTRICTS.iter().map(|(division, _)| *division).collect()
}

/// Other districts in the same division as `district`, for "donors near you"
/// suggestions. When the district is unknown, falls back to the first five
/// other districts of the master list.
pub fn nearby_districts(district: &str) -> Vec<&'static str> {
    for (_, districts) in DIVISION_DISTRICTS {
        if districts.contains(&district) {
            return districts.iter().copied().filter(|d| *d != district).collect();
        }
    }

    DISTRICTS
        .iter()
        .copied()
        .filter(|d| *d != district)
        .take(5)
        .collect()
}
