//! `meta` and `links` blocks of paginated responses.

use crate::paging::{DEFAULT_PER_PAGE, Page, PageRequest};
use serde::Serialize;

/// Position of a page within the full result set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    current_page: u32,
    from: Option<u64>,
    last_page: u64,
    path: String,
    per_page: u32,
    to: Option<u64>,
    total: u64,
}

/// Navigation URLs; `prev` and `next` are `null` at either end.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    first: String,
    last: String,
    prev: Option<String>,
    next: Option<String>,
}

impl PageMeta {
    /// Describes `page`, served from `path`.
    #[must_use]
    pub fn describe<T>(page: &Page<T>, path: &str) -> Self {
        let request = page.request();
        Self {
            current_page: request.page(),
            from: page.from(),
            last_page: page.last_page(),
            path: path.to_owned(),
            per_page: request.per_page(),
            to: page.to(),
            total: page.total(),
        }
    }
}

impl PageLinks {
    /// Builds the links around `page`, served from `path`.
    #[must_use]
    pub fn around<T>(page: &Page<T>, path: &str) -> Self {
        let request = page.request();
        let current = u64::from(request.page());
        let last = page.last_page();
        let link = |number: u64| page_url(path, request, number);
        Self {
            first: link(1),
            last: link(last),
            prev: (current > 1).then(|| link(current - 1)),
            next: (current < last).then(|| link(current + 1)),
        }
    }
}

fn page_url(path: &str, request: PageRequest, number: u64) -> String {
    if request.per_page() == DEFAULT_PER_PAGE {
        format!("{path}?page={number}")
    } else {
        format!("{path}?page={number}&per_page={}", request.per_page())
    }
}
