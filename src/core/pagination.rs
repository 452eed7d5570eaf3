use crate::core::fields::parse_id_str;
use crate::domain::model::PaginationDefaults;
use serde::Serialize;

/// LIMIT/OFFSET window requested through `?page=&pageSize=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub offset: u64,
}

impl Pagination {
    /// `None` when `page` is absent or empty, meaning "return every row".
    /// Unparsable or non-positive values fall back to page 1 and the
    /// default page size.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>, defaults: &PaginationDefaults) -> Option<Self> {
        let page = page.filter(|p| !p.is_empty())?;

        let page = positive_number(page).unwrap_or(1);

        let mut page_size = page_size
            .and_then(positive_number)
            .unwrap_or(defaults.default_page_size);
        if let Some(max) = defaults.max_page_size {
            page_size = page_size.min(max);
        }

        Some(Self {
            page,
            page_size,
            offset: u64::from(page - 1) * u64::from(page_size),
        })
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Leading integer of a query value when it is at least 1, saturating at
/// `u32::MAX`.
fn positive_number(value: &str) -> Option<u32> {
    match parse_id_str(value) {
        Some(n) if n >= 1 => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        Some(_) => None,
        // digits that overflow i64
        None => {
            let value = value.trim_start();
            let unsigned = value.strip_prefix('+').unwrap_or(value);
            unsigned.starts_with(|c: char| c.is_ascii_digit()).then_some(u32::MAX)
        }
    }
}
