/// Default page size when the caller passes a non-positive limit.
pub const DEFAULT_LIMIT: u64 = 10;

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    /// Clamps `page < 1` to 1 and `limit <= 0` to [`DEFAULT_LIMIT`].
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page < 1 { 1 } else { page as u64 },
            limit: if limit <= 0 {
                DEFAULT_LIMIT
            } else {
                limit as u64
            },
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Zero-based index as used by SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT as i64)
    }
}

/// One page of rows plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
