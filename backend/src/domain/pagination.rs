//! Offset pagination primitives shared by list endpoints.

/// Page size used when the caller does not provide `limit`.
pub const DEFAULT_PAGE_LIMIT: u32 = 6;
/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Validation errors for page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("page must be at least 1")]
    PageOutOfRange,
    #[error("limit must be between 1 and {max}")]
    LimitOutOfRange { max: u32 },
}

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Validate optional page parameters, applying defaults.
    ///
    /// # Examples
    /// ```
    /// use cookbook::domain::PageRequest;
    ///
    /// let page = PageRequest::new(Some(3), Some(10))?;
    /// assert_eq!(page.offset(), 20);
    /// # Ok::<(), cookbook::domain::PageRequestError>(())
    /// ```
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// One page of results plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// An empty first page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            request,
        }
    }

    /// Following page number, if any rows remain beyond this page.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        let seen = self.request.offset() + u64::from(self.request.limit());
        (seen < self.total).then(|| self.request.page() + 1)
    }

    /// Preceding page number, if this is not the first page.
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        (self.request.page() > 1).then(|| self.request.page() - 1)
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}
