//! Analytics aggregates. The shape is what the analytics endpoints return,
//! whether the numbers come from the backend or from `analytics::mock`.

use serde::{Deserialize, Serialize};

use super::enums::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub overview: AnalyticsOverview,
    pub top_diagnoses: Vec<DiagnosisFrequency>,
    pub top_prescriptions: Vec<PrescriptionFrequency>,
    pub demographics: Demographics,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
    pub districts: Vec<DistrictStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_patients: u64,
    pub total_visits: u64,
    pub total_diagnoses: u64,
    pub total_prescriptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisFrequency {
    pub diagnosis_code: String,
    pub description: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionFrequency {
    pub medication_name: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: Vec<GenderBreakdown>,
    pub age_groups: Vec<AgeGroupBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderBreakdown {
    pub gender: Gender,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupBreakdown {
    pub age_group: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Short month name, `Jan` through `Dec`.
    pub month: String,
    pub visits: u64,
    pub diagnoses: u64,
    pub prescriptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub season: String,
    pub top_condition: String,
    pub cases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictStats {
    pub district: String,
    pub clinics: u64,
    pub patients: u64,
    pub visits: u64,
}

impl AnalyticsReport {
    /// Integer-divide every count by `divisor`, keeping percentages as they are.
    /// A divisor of 0 is treated as 1.
    pub fn scaled(&self, divisor: u64) -> Self {
        let divisor = divisor.max(1);
        let s = |n: u64| n / divisor;

        Self {
            overview: AnalyticsOverview {
                total_patients: s(self.overview.total_patients),
                total_visits: s(self.overview.total_visits),
                total_diagnoses: s(self.overview.total_diagnoses),
                total_prescriptions: s(self.overview.total_prescriptions),
            },
            top_diagnoses: self
                .top_diagnoses
                .iter()
                .map(|d| DiagnosisFrequency {
                    count: s(d.count),
                    ..d.clone()
                })
                .collect(),
            top_prescriptions: self
                .top_prescriptions
                .iter()
                .map(|p| PrescriptionFrequency {
                    count: s(p.count),
                    ..p.clone()
                })
                .collect(),
            demographics: Demographics {
                gender: self
                    .demographics
                    .gender
                    .iter()
                    .map(|g| GenderBreakdown {
                        count: s(g.count),
                        ..g.clone()
                    })
                    .collect(),
                age_groups: self
                    .demographics
                    .age_groups
                    .iter()
                    .map(|a| AgeGroupBreakdown {
                        count: s(a.count),
                        ..a.clone()
                    })
                    .collect(),
            },
            monthly_trends: self
                .monthly_trends
                .iter()
                .map(|m| MonthlyTrend {
                    month: m.month.clone(),
                    visits: s(m.visits),
                    diagnoses: s(m.diagnoses),
                    prescriptions: s(m.prescriptions),
                })
                .collect(),
            seasonal_patterns: self
                .seasonal_patterns
                .iter()
                .map(|p| SeasonalPattern {
                    cases: s(p.cases),
                    ..p.clone()
                })
                .collect(),
            districts: self
                .districts
                .iter()
                .map(|d| DistrictStats {
                    district: d.district.clone(),
                    clinics: s(d.clinics),
                    patients: s(d.patients),
                    visits: s(d.visits),
                })
                .collect(),
        }
    }
}
