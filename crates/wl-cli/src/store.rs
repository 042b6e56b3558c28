//! JSON-file backed activity and project store.
//!
//! The data file holds a flat list of activities and projects for one
//! organization. A missing file is treated as an empty store so that the
//! report commands work before anything was tracked.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wl_core::{
    Activity, ActivityFilter, ActivityRepository, PageParams, Project, ProjectRepository,
};

/// On-disk layout of the data file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub organization_id: Option<Uuid>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Read-only repository over a single JSON data file.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: DataFile,
}

impl JsonStore {
    /// Opens the data file, treating a missing file as an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("malformed data file: {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => DataFile::default(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read data file: {}", path.display()));
            }
        };
        tracing::debug!(
            path = %path.display(),
            activities = data.activities.len(),
            projects = data.projects.len(),
            "loaded data file"
        );
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tenant scope of the data file.
    ///
    /// Falls back to the scope of the stored projects or activities when the
    /// file does not declare one explicitly.
    #[must_use]
    pub fn organization_id(&self) -> Uuid {
        self.data
            .organization_id
            .or_else(|| self.data.projects.first().map(|p| p.organization_id))
            .or_else(|| self.data.activities.first().map(|a| a.organization_id))
            .unwrap_or_else(Uuid::nil)
    }
}

fn page_slice<T>(items: Vec<T>, page: &PageParams) -> Vec<T> {
    items
        .into_iter()
        .skip(page.page * page.size)
        .take(page.size)
        .collect()
}

impl ActivityRepository for JsonStore {
    type Error = anyhow::Error;

    /// Returns the activities intersecting the filter window, ordered by
    /// start time.
    fn find_activities(
        &self,
        filter: &ActivityFilter,
        page: &PageParams,
    ) -> Result<Vec<Activity>> {
        let start = filter.start();
        let end = filter.end();
        let mut activities: Vec<Activity> = self
            .data
            .activities
            .iter()
            .filter(|a| a.start < end && a.end > start)
            .cloned()
            .collect();
        activities.sort_by_key(|a| a.start);
        Ok(page_slice(activities, page))
    }
}

impl ProjectRepository for JsonStore {
    type Error = anyhow::Error;

    /// Returns the projects of the organization, ordered by title.
    fn find_projects(&self, organization_id: Uuid, page: &PageParams) -> Result<Vec<Project>> {
        let mut projects: Vec<Project> = self
            .data
            .projects
            .iter()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(page_slice(projects, page))
    }
}
