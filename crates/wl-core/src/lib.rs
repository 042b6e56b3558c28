//! Core domain logic for the worklog time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Activities: tracked time intervals and their derived durations
//! - Filters: calendar-aligned reporting windows and their navigation
//! - Reports: per-day and per-project aggregation of tracked time
//!
//! Everything here is pure computation. Fetching activities and projects is
//! the job of the repository traits in [`repository`]; rendering is the job
//! of the frontends.

pub mod activity;
pub mod clock;
mod duration;
pub mod error;
pub mod filter;
pub mod project;
pub mod report;
pub mod repository;

pub use activity::Activity;
pub use clock::{Clock, FixedClock, SystemClock};
pub use duration::format_minutes_as_duration;
pub use error::{FilterError, ReportError};
pub use filter::{ActivityFilter, SortField, SortOrder, Timespan};
pub use project::{Project, ProjectsById};
pub use report::{
    ProjectReportItem, TimeReportItem, sorted_for_display, sum_by_day, sum_by_project,
    total_minutes,
};
pub use repository::{ActivityRepository, PageParams, ProjectRepository};
