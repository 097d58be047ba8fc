use serde::{Deserialize, Serialize};

/// Caller-supplied page request. Neither field is validated here;
/// non-positive values fall through to the repository's skip/limit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// `(page - 1) * limit`, saturating instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Listing metadata. `total` counts every record matching the filter,
/// independent of offset and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetadata {
    pub total: u64,
    pub offset: i64,
    pub limit: i64,
}
