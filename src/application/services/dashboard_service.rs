//! Overview figures for the user's collection.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::entities::{ListQuery, Resource, ResourceFilters};
use crate::domain::repositories::ResourceRepository;
use crate::error::AppError;

/// Number of recent resources shown on the dashboard.
pub const RECENT_LIMIT: u32 = 5;

/// Dashboard figures.
///
/// `public_resources` and `total_clicks` are computed over `recent` only;
/// the API offers no aggregate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_resources: u64,
    pub public_resources: usize,
    pub total_clicks: u64,
    pub recent: Vec<Resource>,
}

impl DashboardSummary {
    pub fn from_recent(total_resources: u64, recent: Vec<Resource>) -> Self {
        Self {
            total_resources,
            public_resources: recent.iter().filter(|r| r.is_public).count(),
            total_clicks: recent.iter().map(|r| r.click_count).sum(),
            recent,
        }
    }
}

pub struct DashboardService<R: ResourceRepository> {
    repository: Arc<R>,
}

impl<R: ResourceRepository> DashboardService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Loads the first page of the user's resources and summarizes it.
    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let query = ListQuery::new(&ResourceFilters::default(), 1, RECENT_LIMIT);
        let page = self.repository.list(&query).await?;
        Ok(DashboardSummary::from_recent(page.total, page.resources))
    }
}
