//! Page windows and page links for collection-valued endpoints.

use thiserror::Error;

use crate::types::{Link, RelType};

/// Invalid paging query parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("The parameter 'limit' you supplied is invalid. It must be an integer")]
    InvalidLimit,

    #[error("The parameter '{0}' you supplied is invalid. It must be a positive integer")]
    InvalidPaging(&'static str),
}

/// Paging parameters as requested, before the total is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
    pub limit: Option<usize>,
}

impl PageRequest {
    /// Read `page`, `per_page` and `limit` from query pairs.
    ///
    /// Missing or empty values take the defaults (`page=1`, `per_page=default_per_page`).
    pub fn from_query(
        query: &[(String, String)],
        default_per_page: usize,
    ) -> Result<Self, PaginationError> {
        let value = |key: &str| {
            query
                .iter()
                .find(|(k, v)| k == key && !v.trim().is_empty())
                .map(|(_, v)| v.trim())
        };

        let positive = |key: &'static str, default: usize| -> Result<usize, PaginationError> {
            match value(key) {
                None => Ok(default),
                Some(v) => match v.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(n),
                    _ => Err(PaginationError::InvalidPaging(key)),
                },
            }
        };

        let page = positive("page", 1)?;
        let per_page = positive("per_page", default_per_page)?;
        let limit = value("limit")
            .map(|v| v.parse::<usize>().map_err(|_| PaginationError::InvalidLimit))
            .transpose()?;

        Ok(Self {
            page,
            per_page,
            limit,
        })
    }

    /// Fix the window once the total number of members is known.
    pub fn window(&self, total_count: usize) -> PageWindow {
        PageWindow {
            page: self.page,
            per_page: self.per_page,
            limit: self.limit,
            total_count,
        }
    }
}

/// A resolved page of a member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    /// When set, the first `limit` members are returned and paging is bypassed.
    pub limit: Option<usize>,
    pub total_count: usize,
}

/// Which page link to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLinkKind {
    First,
    Prev,
    Next,
    Last,
}

impl PageLinkKind {
    pub fn rel(&self) -> RelType {
        match self {
            PageLinkKind::First => RelType::First,
            PageLinkKind::Prev => RelType::Prev,
            PageLinkKind::Next => RelType::Next,
            PageLinkKind::Last => RelType::Last,
        }
    }
}

/// Integer ceiling division; `b` must be non-zero.
pub fn ceiling_div(a: usize, b: usize) -> usize {
    a / b + usize::from(a % b != 0)
}

impl PageWindow {
    /// Index of the first member on this page. Saturates at `usize::MAX`.
    pub fn start(&self) -> usize {
        match self.limit {
            Some(_) => 0,
            None => self.page.saturating_sub(1).saturating_mul(self.per_page),
        }
    }

    /// Index one past the last member on this page (saturating, not clamped to the total).
    pub fn end(&self) -> usize {
        match self.limit {
            Some(limit) => limit,
            None => self.start().saturating_add(self.per_page),
        }
    }

    pub fn last_page(&self) -> usize {
        ceiling_div(self.total_count, self.per_page)
    }

    /// The members of `items` that fall on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start().min(items.len());
        let end = self.end().min(items.len());
        &items[start..end]
    }

    /// Target page for a link kind, if that link exists for this window.
    pub fn target(&self, kind: PageLinkKind) -> Option<usize> {
        if self.limit.is_some() {
            return None;
        }
        let last = self.last_page();
        match kind {
            PageLinkKind::First => Some(1),
            PageLinkKind::Prev => (self.page > 1).then(|| self.page - 1),
            PageLinkKind::Next => (self.page < last).then(|| self.page + 1),
            PageLinkKind::Last => (last > 0).then_some(last),
        }
    }

    /// `first`, `prev`, `next` and `last` links that exist for this window.
    pub fn links(&self, base_uri: &str) -> Vec<Link> {
        [
            PageLinkKind::First,
            PageLinkKind::Prev,
            PageLinkKind::Next,
            PageLinkKind::Last,
        ]
        .into_iter()
        .filter_map(|kind| {
            self.target(kind)
                .map(|page| Link::new(link_for(base_uri, self.per_page, page), kind.rel()))
        })
        .collect()
    }
}

/// The URI of one page of a member list.
pub fn link_for(base_uri: &str, per_page: usize, page: usize) -> String {
    format!("{}?per_page={}&page={}", base_uri, per_page, page)
}
