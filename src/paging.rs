//! Offset pagination shared by repository ports and the HTTP surface.

use thiserror::Error;

/// Default number of items per page when the caller does not choose one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Upper bound accepted for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Errors returned while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1, got {0}")]
    InvalidPage(u32),

    /// The page size is zero or above [`MAX_PER_PAGE`].
    #[error("per_page must be between 1 and {MAX_PER_PAGE}, got {0}")]
    InvalidPerPage(u32),
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `per_page` is out
    /// of range.
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage(page));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PageRequestError::InvalidPerPage(per_page));
        }
        Ok(Self { page, per_page })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// A page of items together with the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    request: PageRequest,
    total: u64,
}

impl<T> Page<T> {
    /// Wraps the items selected for `request` out of `total` matches.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            request,
            total,
        }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Total number of matching items across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Last page number; an empty result still has one (empty) page.
    #[must_use]
    pub fn last_page(&self) -> u64 {
        self.total
            .div_ceil(u64::from(self.request.per_page))
            .max(1)
    }

    /// One-based index of the first item on this page, if any.
    #[must_use]
    pub fn from(&self) -> Option<u64> {
        (!self.items.is_empty()).then(|| self.request.offset() + 1)
    }

    /// One-based index of the last item on this page, if any.
    #[must_use]
    pub fn to(&self) -> Option<u64> {
        let count = u64::try_from(self.items.len()).ok()?;
        (count > 0).then(|| self.request.offset() + count)
    }

    /// Maps the items while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }

    /// Like [`Page::map`] but for fallible conversions.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            request: self.request,
            total: self.total,
        })
    }
}

/// Selects the slice of `items` that `request` covers.
///
/// Used by in-memory adapters after filtering and sorting.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let per_page = usize::try_from(request.per_page()).unwrap_or(usize::MAX);
    let selected = items.into_iter().skip(offset).take(per_page).collect();
    Page::new(selected, request, total)
}
