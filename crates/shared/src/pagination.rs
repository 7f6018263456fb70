use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u64 = 6;
pub const MAX_PAGE_SIZE: u64 = 100;

/// `?page=&limit=` query arguments.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageArgs {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Saturates for page numbers far past any row, `check` rejects those.
    pub fn offset(&self) -> u64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }

    /// Page 1 is always valid, even when there are no rows.
    pub fn check(&self, count: i64) -> crate::Result<()> {
        let page = self.page();
        let Some(offset) = page
            .saturating_sub(1)
            .checked_mul(self.limit())
            .filter(|offset| i64::try_from(*offset).is_ok())
        else {
            return Err(crate::Error::InvalidPage);
        };

        if page == 0 || (page > 1 && offset >= count.max(0) as u64) {
            return Err(crate::Error::InvalidPage);
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub count: i64,
    pub page: u64,
    pub limit: u64,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, count: i64, args: &PageArgs) -> Self {
        Self {
            count,
            page: args.page(),
            limit: args.limit(),
            rows,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_mul(self.limit) < self.count.max(0) as u64
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            page: self.page,
            limit: self.limit,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
