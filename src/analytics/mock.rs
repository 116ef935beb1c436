//! Hand-authored analytics fixtures.
//!
//! All data in this module is hardcoded and fictional. It stands in for the
//! analytics endpoints until the backend serves them, and has exactly the
//! shape those endpoints return.

use crate::models::{
    AgeGroupBreakdown, AnalyticsOverview, AnalyticsReport, Demographics, DiagnosisFrequency,
    DistrictStats, Gender, GenderBreakdown, MonthlyTrend, PrescriptionFrequency, SeasonalPattern,
};

/// Divisor applied to system-wide counts to produce clinic-level figures.
pub const CLINIC_SCALE: u64 = 10;

const DIAGNOSES: &[(&str, &str, u64, f64)] = &[
    ("B54", "Malaria, unspecified", 1842, 22.4),
    ("J06.9", "Acute upper respiratory infection", 1376, 16.7),
    ("A09", "Infectious gastroenteritis and colitis", 998, 12.1),
    ("I10", "Essential (primary) hypertension", 812, 9.9),
    ("E11.9", "Type 2 diabetes mellitus without complications", 534, 6.5),
    ("N39.0", "Urinary tract infection, site not specified", 487, 5.9),
    ("L30.9", "Dermatitis, unspecified", 362, 4.4),
    ("J45.909", "Unspecified asthma, uncomplicated", 241, 2.9),
];

const PRESCRIPTIONS: &[(&str, u64, f64)] = &[
    ("Artemether/Lumefantrine", 1654, 19.8),
    ("Paracetamol", 1521, 18.2),
    ("Amoxicillin", 1187, 14.2),
    ("Oral Rehydration Salts", 903, 10.8),
    ("Amlodipine", 611, 7.3),
    ("Metformin", 498, 6.0),
    ("Cotrimoxazole", 402, 4.8),
    ("Salbutamol inhaler", 219, 2.6),
];

const GENDER: &[(Gender, u64, f64)] = &[
    (Gender::Female, 3412, 54.3),
    (Gender::Male, 2796, 44.5),
    (Gender::Other, 76, 1.2),
];

const AGE_GROUPS: &[(&str, u64, f64)] = &[
    ("0-4", 1131, 18.0),
    ("5-17", 1382, 22.0),
    ("18-34", 1571, 25.0),
    ("35-49", 1068, 17.0),
    ("50-64", 691, 11.0),
    ("65+", 441, 7.0),
];

const MONTHS: &[(&str, u64, u64, u64)] = &[
    ("Jan", 812, 701, 655),
    ("Feb", 774, 668, 620),
    ("Mar", 869, 742, 700),
    ("Apr", 921, 803, 751),
    ("May", 688, 590, 542),
    ("Jun", 603, 511, 470),
    ("Jul", 587, 498, 455),
    ("Aug", 612, 520, 481),
    ("Sep", 644, 553, 509),
    ("Oct", 701, 606, 563),
    ("Nov", 842, 731, 690),
    ("Dec", 903, 789, 740),
];

const SEASONS: &[(&str, &str, u64)] = &[
    ("Rainy season (Nov-Apr)", "Malaria", 1320),
    ("Post-rainy (May-Jun)", "Acute respiratory infection", 604),
    ("Cool dry (Jul-Aug)", "Acute respiratory infection", 512),
    ("Hot dry (Sep-Oct)", "Gastroenteritis", 433),
];

const DISTRICTS: &[(&str, u64, u64, u64)] = &[
    ("Lilongwe Rural", 14, 2104, 3387),
    ("Dedza", 9, 1288, 2011),
    ("Ntcheu", 7, 1046, 1598),
    ("Salima", 6, 977, 1402),
    ("Nkhotakota", 4, 869, 1133),
];

/// System-wide analytics fixture.
pub fn system_report() -> AnalyticsReport {
    let total_visits = MONTHS.iter().map(|m| m.1).sum();
    let total_diagnoses = MONTHS.iter().map(|m| m.2).sum();
    let total_prescriptions = MONTHS.iter().map(|m| m.3).sum();

    AnalyticsReport {
        overview: AnalyticsOverview {
            total_patients: GENDER.iter().map(|g| g.1).sum(),
            total_visits,
            total_diagnoses,
            total_prescriptions,
        },
        top_diagnoses: DIAGNOSES
            .iter()
            .map(|&(code, description, count, percentage)| DiagnosisFrequency {
                diagnosis_code: code.to_string(),
                description: description.to_string(),
                count,
                percentage,
            })
            .collect(),
        top_prescriptions: PRESCRIPTIONS
            .iter()
            .map(|&(name, count, percentage)| PrescriptionFrequency {
                medication_name: name.to_string(),
                count,
                percentage,
            })
            .collect(),
        demographics: Demographics {
            gender: GENDER
                .iter()
                .map(|&(gender, count, percentage)| GenderBreakdown {
                    gender,
                    count,
                    percentage,
                })
                .collect(),
            age_groups: AGE_GROUPS
                .iter()
                .map(|&(group, count, percentage)| AgeGroupBreakdown {
                    age_group: group.to_string(),
                    count,
                    percentage,
                })
                .collect(),
        },
        monthly_trends: MONTHS
            .iter()
            .map(|&(month, visits, diagnoses, prescriptions)| MonthlyTrend {
                month: month.to_string(),
                visits,
                diagnoses,
                prescriptions,
            })
            .collect(),
        seasonal_patterns: SEASONS
            .iter()
            .map(|&(season, condition, cases)| SeasonalPattern {
                season: season.to_string(),
                top_condition: condition.to_string(),
                cases,
            })
            .collect(),
        districts: DISTRICTS
            .iter()
            .map(|&(district, clinics, patients, visits)| DistrictStats {
                district: district.to_string(),
                clinics,
                patients,
                visits,
            })
            .collect(),
    }
}

/// Clinic-level analytics fixture: system counts divided by `CLINIC_SCALE`.
pub fn clinic_report() -> AnalyticsReport {
    system_report().scaled(CLINIC_SCALE)
}
