//! Boundary to the persistence layer.
//!
//! The engine never performs I/O itself; frontends supply implementations of
//! these traits and hand the fetched data to the aggregations in
//! [`crate::report`].

use uuid::Uuid;

use crate::activity::Activity;
use crate::filter::ActivityFilter;
use crate::project::Project;

/// Pagination window for repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: usize,
    pub size: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 0, size: 100 }
    }
}

/// Fetches activities for a report window.
///
/// Implementations must return all activities whose `[start, end)` interval
/// intersects the filter's resolved `[start(), end())`.
pub trait ActivityRepository {
    type Error;

    fn find_activities(
        &self,
        filter: &ActivityFilter,
        page: &PageParams,
    ) -> Result<Vec<Activity>, Self::Error>;
}

/// Fetches the projects of an organization, feeding the lookup table.
pub trait ProjectRepository {
    type Error;

    fn find_projects(
        &self,
        organization_id: Uuid,
        page: &PageParams,
    ) -> Result<Vec<Project>, Self::Error>;
}
