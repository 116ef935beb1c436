use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::StaffRole;
use crate::config::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// Paginated list envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// An empty first page, used as the initial value of list screens.
    pub fn empty(query: PageQuery) -> Self {
        let query = query.normalized();
        Self {
            data: Vec::new(),
            page: query.page,
            per_page: query.per_page,
            total: 0,
            total_pages: 0,
        }
    }

    /// Slice one page out of a complete, already-filtered list.
    pub fn paginate(items: Vec<T>, query: PageQuery) -> Self {
        let query = query.normalized();
        let total = items.len() as u64;
        let total_pages = total_pages(total, query.per_page);
        let skip = ((query.page - 1) as usize).saturating_mul(query.per_page as usize);
        let data = items
            .into_iter()
            .skip(skip)
            .take(query.per_page as usize)
            .collect();
        Self {
            data,
            page: query.page,
            per_page: query.per_page,
            total,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as u64) as u32
}

/// `page` / `per_page` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }.normalized()
    }

    pub fn page(page: u32) -> Self {
        Self::new(page, DEFAULT_PER_PAGE)
    }

    /// Clamp to `page >= 1` and `1..=MAX_PER_PAGE`.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.per_page)
    }

    pub fn previous(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.per_page)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

/// Blank search input means "no filter".
pub fn search_term(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
