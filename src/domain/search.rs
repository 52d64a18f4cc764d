//! Pagination, filtering and ordering shared by every searchable store.
//!
//! Stores translate a [`SearchQuery`] into their own query language; the
//! in-memory evaluation in [`SearchQuery::apply`] is the reference behaviour
//! they have to agree with.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::genre::Genre;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 15;

/// Direction applied to the resolved sort keys.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    #[default]
    Asc,
    Desc,
}

/// Column a search result is ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    /// Name first, id as tie-break.
    Name,
    Id,
    /// No tie-break: rows created at the same instant keep backend order.
    CreatedAt,
    /// Empty or unrecognised field: name then id, always ascending.
    Default,
}

impl SortField {
    /// Case-insensitive lookup. The value is not trimmed, so `" name"` is
    /// unrecognised.
    pub fn resolve(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "name" => Self::Name,
            "id" => Self::Id,
            "createdat" => Self::CreatedAt,
            _ => Self::Default,
        }
    }

    /// Direction actually applied; [`SortField::Default`] ignores the request.
    pub fn direction(self, requested: SearchOrder) -> SearchOrder {
        match self {
            Self::Default => SearchOrder::Asc,
            _ => requested,
        }
    }
}

/// Query parameters used when searching any aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
    /// Substring matched against the aggregate name; blank disables filtering.
    pub search: String,
    /// Raw sort field as received, resolved with [`SortField::resolve`].
    pub sort: String,
    pub dir: SearchOrder,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            sort: String::new(),
            dir: SearchOrder::Asc,
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn sort(mut self, sort: impl Into<String>, dir: SearchOrder) -> Self {
        self.sort = sort.into();
        self.dir = dir;
        self
    }

    /// The name filter, if any.
    pub fn search_term(&self) -> Option<&str> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(&self.search)
        }
    }

    pub fn sort_field(&self) -> SortField {
        SortField::resolve(&self.sort)
    }

    /// Rows to skip. A page of zero behaves like the first page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> usize {
        self.per_page
    }

    /// Evaluates the query over already-loaded rows.
    pub fn apply<T, I>(&self, rows: I) -> SearchResult<T>
    where
        T: SearchRecord,
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = rows.into_iter().filter(|row| self.matches(row)).collect();
        let total = items.len();

        let field = self.sort_field();
        items.sort_by(|a, b| compare(a, b, field, self.dir));

        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();

        SearchResult {
            page: self.page,
            per_page: self.per_page,
            total,
            items,
        }
    }

    /// Case-insensitive substring match, mirroring SQLite `LIKE`.
    pub fn matches<T: SearchRecord>(&self, row: &T) -> bool {
        match self.search_term() {
            Some(term) => row
                .search_name()
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// Paged response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<T> {
    pub page: usize,
    pub per_page: usize,
    /// Filtered row count before pagination.
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> SearchResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
        SearchResult {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Columns a searchable aggregate exposes to filtering and ordering.
pub trait SearchRecord {
    fn search_name(&self) -> &str;
    fn search_id(&self) -> Uuid;
    fn search_created_at(&self) -> NaiveDateTime;
}

fn compare<T: SearchRecord>(a: &T, b: &T, field: SortField, dir: SearchOrder) -> Ordering {
    let ordering = match field {
        SortField::Name | SortField::Default => a
            .search_name()
            .cmp(b.search_name())
            .then_with(|| a.search_id().cmp(&b.search_id())),
        SortField::Id => a.search_id().cmp(&b.search_id()),
        SortField::CreatedAt => a.search_created_at().cmp(&b.search_created_at()),
    };
    match field.direction(dir) {
        SearchOrder::Asc => ordering,
        SearchOrder::Desc => ordering.reverse(),
    }
}

impl SearchRecord for Category {
    fn search_name(&self) -> &str {
        self.name()
    }

    fn search_id(&self) -> Uuid {
        self.id().get()
    }

    fn search_created_at(&self) -> NaiveDateTime {
        self.created_at()
    }
}

impl SearchRecord for Genre {
    fn search_name(&self) -> &str {
        self.name()
    }

    fn search_id(&self) -> Uuid {
        self.id().get()
    }

    fn search_created_at(&self) -> NaiveDateTime {
        self.created_at()
    }
}

impl SearchRecord for CastMember {
    fn search_name(&self) -> &str {
        self.name()
    }

    fn search_id(&self) -> Uuid {
        self.id().get()
    }

    fn search_created_at(&self) -> NaiveDateTime {
        self.created_at()
    }
}
