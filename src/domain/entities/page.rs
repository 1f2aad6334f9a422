//! Filters, pagination state and paged list responses.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;

use super::resource::Resource;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 12;

/// Criteria applied to a resource listing.
///
/// An empty string means "no constraint" for that field and `is_public: None`
/// means "any visibility". Unset and empty are the same thing here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFilters {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl ResourceFilters {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// True when at least one field constrains the listing.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || !self.category.is_empty()
            || !self.tags.is_empty()
            || self.is_public.is_some()
    }
}

/// Pagination metadata for the page currently held by a store.
///
/// `pages` is computed by the server and trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    /// Initial state: first page, nothing loaded yet.
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            pages: 0,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}

/// Body of the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePage {
    /// The backend encodes an empty page as `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resources: Vec<Resource>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
}

impl ResourcePage {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total: self.total,
            pages: self.pages,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Resource>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Resource>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Query string sent to the list endpoints.
///
/// Empty filter strings and `is_public: None` are left out of the query;
/// `page` and `limit` are always present.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
    pub is_public: Option<bool>,
    pub page: u32,
    pub limit: u32,
}

impl ListQuery {
    pub fn new(filters: &ResourceFilters, page: u32, limit: u32) -> Self {
        Self {
            search: filters.search.clone(),
            category: filters.category.clone(),
            tags: filters.tags.clone(),
            is_public: filters.is_public,
            page,
            limit,
        }
    }
}
