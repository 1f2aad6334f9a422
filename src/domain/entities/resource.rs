//! Resource entity: a saved developer link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use url::Url;

use crate::error::AppError;

/// Server-assigned resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A bookmarked link as returned by the API.
///
/// `click_count`, `created_at` and `id` are owned by the server; the client
/// never edits them and only sends [`ResourceInput`] back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Raw comma-separated tag string. See [`Resource::tag_list`].
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub click_count: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource {
    /// Tags split on commas, trimmed, empty tokens dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        parse_tags(&self.tags)
    }

    /// Suggested category this resource belongs to, if its category is one.
    pub fn suggested_category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }

    /// Category label for display, `Uncategorized` when blank.
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            "Uncategorized"
        } else {
            &self.category
        }
    }
}

/// Splits a raw comma-separated tag string into display tokens.
pub fn parse_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Fields a user can set when creating or editing a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInput {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_public: bool,
}

impl ResourceInput {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Checks the input before it is sent anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with:
    /// - `"Title and URL are required"` if either is blank
    /// - `"Please enter a valid URL"` if the URL is not an absolute URL
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() || self.url.trim().is_empty() {
            return Err(AppError::validation(
                "Title and URL are required",
                json!({ "fields": ["title", "url"] }),
            ));
        }

        Url::parse(self.url.trim()).map_err(|e| {
            AppError::validation(
                "Please enter a valid URL",
                json!({ "url": self.url, "reason": e.to_string() }),
            )
        })?;

        Ok(())
    }
}

impl From<&Resource> for ResourceInput {
    fn from(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            url: resource.url.clone(),
            description: resource.description.clone(),
            category: resource.category.clone(),
            tags: resource.tags.clone(),
            is_public: resource.is_public,
        }
    }
}

/// Suggested categories offered when filing a resource.
///
/// The server does not enforce this set; any string is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Documentation,
    Tutorial,
    Tool,
    Library,
    Framework,
    Blog,
    Video,
    Course,
    Repository,
    Article,
    Reference,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Documentation,
        Category::Tutorial,
        Category::Tool,
        Category::Library,
        Category::Framework,
        Category::Blog,
        Category::Video,
        Category::Course,
        Category::Repository,
        Category::Article,
        Category::Reference,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Documentation => "Documentation",
            Category::Tutorial => "Tutorial",
            Category::Tool => "Tool",
            Category::Library => "Library",
            Category::Framework => "Framework",
            Category::Blog => "Blog",
            Category::Video => "Video",
            Category::Course => "Course",
            Category::Repository => "Repository",
            Category::Article => "Article",
            Category::Reference => "Reference",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(value: &str) -> Option<Category> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
