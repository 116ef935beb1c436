use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Gender;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub phone: String,
    pub clinic_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on(self.date_of_birth, date)
    }
}

/// Age in whole years on `date`.
///
/// One year is added per birthday anniversary reached; a Feb 29 birthday
/// reaches its anniversary on Mar 1 in non-leap years. Dates before the
/// birth date yield 0.
pub fn age_on(date_of_birth: NaiveDate, date: NaiveDate) -> u32 {
    if date <= date_of_birth {
        return 0;
    }
    let mut years = date.year() - date_of_birth.year();
    if (date.month(), date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn day_before_anniversary_is_still_previous_age() {
        assert_eq!(age_on(d("2000-06-15"), d("2024-06-14")), 23);
    }

    #[test]
    fn anniversary_day_increments_age() {
        assert_eq!(age_on(d("2000-06-15"), d("2024-06-15")), 24);
    }

    #[test]
    fn leap_day_birthday_in_non_leap_year() {
        assert_eq!(age_on(d("2000-02-29"), d("2023-02-28")), 22);
        assert_eq!(age_on(d("2000-02-29"), d("2023-03-01")), 23);
        assert_eq!(age_on(d("2000-02-29"), d("2024-02-29")), 24);
    }

    #[test]
    fn future_birth_date_is_zero() {
        assert_eq!(age_on(d("2030-01-01"), d("2024-06-15")), 0);
        assert_eq!(age_on(d("2024-06-15"), d("2024-06-15")), 0);
    }

    #[test]
    fn newborn_under_one_year() {
        assert_eq!(age_on(d("2024-01-10"), d("2024-12-31")), 0);
    }

    #[test]
    fn gender_serializes_capitalized() {
        let json = serde_json::to_value(Gender::Female).unwrap();
        assert_eq!(json, "Female");
    }
}
