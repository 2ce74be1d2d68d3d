//! DataSource Trait
//!
//! Abstraction over the server that owns a paginated record set. The remote table only
//! translates interactions into [`PageRequest`]s; a source turns them into pages.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::sort::SortDirection;
use crate::domain::DateRange;
use crate::error::Result;

/// Parameters of a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page
    pub page: u32,
    pub page_size: u32,
    /// Wire name of the sort field
    pub sort_by: Option<&'static str>,
    pub sort_order: Option<SortDirection>,
    /// Committed search term (never empty)
    pub search: Option<String>,
    /// Date range, for endpoints scoped by date
    pub range: Option<DateRange>,
}

impl PageRequest {
    /// Query parameters in wire form
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(7);
        if let Some(range) = &self.range {
            query.push(("start", range.start_param()));
            query.push(("end", range.end_param()));
        }
        query.push(("page", self.page.to_string()));
        query.push(("page_size", self.page_size.to_string()));
        if let Some(sort_by) = self.sort_by {
            query.push(("sort_by", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            query.push(("sort_order", order.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        query
    }
}

/// One page of records as reported by the server.
///
/// The page size arrives as `page_size` on some endpoints and `pageSize` on others;
/// both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    pub data: Vec<R>,
    pub page: u32,
    #[serde(alias = "pageSize")]
    pub page_size: u32,
    pub total: u64,
}

/// Trait for sources of server-paginated records
pub trait DataSource<R>: Send + Sync + 'static {
    /// Fetch exactly one page
    fn fetch_page(&self, request: PageRequest) -> impl Future<Output = Result<Page<R>>> + Send;
}
