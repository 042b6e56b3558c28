//! Error types for filter construction and report aggregation.

use thiserror::Error;
use uuid::Uuid;

/// Rejections for externally supplied filter parameters.
///
/// These surface *before* a filter is constructed; a built `ActivityFilter`
/// is always self-consistent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The timespan token was not one of day/week/month/quarter/year/custom.
    #[error("invalid timespan: {value}")]
    InvalidTimespan { value: String },

    /// The sort field was neither "project" nor "start".
    #[error("invalid sort field: {value}")]
    InvalidSortField { value: String },

    /// The sort order was neither "asc" nor "desc".
    #[error("invalid sort order: {value}")]
    InvalidSortOrder { value: String },

    /// The period value did not match the timespan's canonical format.
    #[error("invalid {timespan} value: {value}")]
    InvalidValue {
        timespan: &'static str,
        value: String,
    },
}

/// Failures surfaced by report aggregation.
///
/// Not fatal by design: callers decide whether to substitute a placeholder
/// label or abort.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReportError {
    /// An activity references a project id absent from the lookup table.
    #[error("no project found for id {0}")]
    ProjectNotFound(Uuid),
}
