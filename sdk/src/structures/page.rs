use serde::{Deserialize, Serialize};

/// One page of records plus where it sits in the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

/// Paging query. Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort keys such as `-created_at`; sent as repeated `sort=` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
}

impl<T> Page<T> {
    /// Build a page from a full listing, slicing out `page` (1-based).
    pub fn paginate(records: Vec<T>, page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_count = records.len() as u64;
        let total_pages = total_count.div_ceil(u64::from(limit)) as u32;
        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let data = records.into_iter().skip(skip).take(limit as usize).collect();
        Self {
            pagination: Pagination {
                page,
                limit,
                total_count,
                total_pages,
            },
            data,
        }
    }
}
