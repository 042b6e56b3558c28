//! Projects and the id-to-project lookup used by aggregation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReportError;

/// A project that activities are tracked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub organization_id: Uuid,
}

/// Lookup table resolving project ids to projects.
///
/// Lookups report a missing entry as [`ReportError::ProjectNotFound`] instead
/// of dereferencing blindly; whether that aborts a report or becomes a
/// placeholder label is the caller's call.
#[derive(Debug, Clone, Default)]
pub struct ProjectsById {
    projects: HashMap<Uuid, Project>,
}

impl ProjectsById {
    #[must_use]
    pub fn new(projects: &[Project]) -> Self {
        projects.iter().cloned().collect()
    }

    pub fn get(&self, id: Uuid) -> Result<&Project, ReportError> {
        self.projects.get(&id).ok_or(ReportError::ProjectNotFound(id))
    }

    pub fn title(&self, id: Uuid) -> Result<&str, ReportError> {
        self.get(id).map(|project| project.title.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl FromIterator<Project> for ProjectsById {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        Self {
            projects: iter
                .into_iter()
                .map(|project| (project.id, project))
                .collect(),
        }
    }
}
