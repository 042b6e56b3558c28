//! Tracked activities and their derived duration metrics.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duration::format_minutes_as_duration;

/// A tracked time interval for a project.
///
/// Read-only to this crate: activities are created and validated elsewhere
/// and fetched through a repository. `end >= start` is intended but not
/// enforced here; an inverted interval yields negative duration values
/// rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub description: String,
    pub project_id: Uuid,
    pub organization_id: Uuid,
    pub username: String,
}

impl Activity {
    fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in whole minutes, truncated (e.g. 75).
    ///
    /// The canonical duration measure used by all aggregations.
    pub fn duration_minutes_total(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Duration in whole hours (e.g. 3).
    pub fn duration_hours(&self) -> i64 {
        self.duration().num_hours()
    }

    /// Minutes of the unfinished hour (e.g. 15).
    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes_total() % 60
    }

    /// Duration as decimal hours (e.g. 0.75).
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_decimal(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }

    /// Duration as formatted string (e.g. `1:15 h`).
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_formatted(&self) -> String {
        format_minutes_as_duration(self.duration_minutes_total() as f64)
    }
}
