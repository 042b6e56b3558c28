//! Aggregation of tracked activities into report rows.
//!
//! Two independent passes over the same activity set: per-calendar-bucket
//! totals ([`sum_by_day`]) and per-project totals ([`sum_by_project`]).
//! Fetching the activities for a filter window is a repository concern; the
//! aggregations assume the relevant set has already been selected.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::activity::Activity;
use crate::duration::format_minutes_as_duration;
use crate::error::ReportError;
use crate::filter::{ActivityFilter, SortField, SortOrder, quarter_of};
use crate::project::ProjectsById;

/// A calendar-bucketed report row.
///
/// Only the fields meaningful to the active grouping are authoritative; the
/// others carry the representative date of the bucket's last activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeReportItem {
    pub year: i32,
    pub quarter: u32,
    pub month: u32,
    pub week: u32,
    pub day: u32,
    pub duration_minutes_total: i64,
}

impl TimeReportItem {
    /// Summed duration as formatted string (e.g. `1:15 h`).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn duration_formatted(&self) -> String {
        format_minutes_as_duration(self.duration_minutes_total as f64)
    }

    /// The report item as a calendar date, if its fields form one.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Representative display label, e.g. `Monday 05.09.2022`.
    #[must_use]
    pub fn day_formatted(&self) -> Option<String> {
        self.as_date().map(|date| date.format("%A %d.%m.%Y").to_string())
    }
}

/// A per-project report row with its resolved title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReportItem {
    pub project_id: Uuid,
    pub project_title: String,
    pub duration_minutes_total: i64,
}

impl ProjectReportItem {
    /// Summed duration as formatted string (e.g. `1:15 h`).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn duration_formatted(&self) -> String {
        format_minutes_as_duration(self.duration_minutes_total as f64)
    }
}

/// Sums activities into buckets keyed by the day-of-month number of their
/// start, ordered by descending day number.
///
/// The key is the day *number*, not the full date: in a range spanning more
/// than one calendar month, the 5th of two different months collapses into a
/// single bucket whose representative date is the last one seen. Known
/// limitation, kept for compatibility with existing report consumers.
#[must_use]
pub fn sum_by_day(activities: &[Activity]) -> Vec<TimeReportItem> {
    let mut buckets: HashMap<u32, TimeReportItem> = HashMap::new();
    for activity in activities {
        let start = activity.start.date();
        let bucket = buckets.entry(start.day()).or_default();
        bucket.year = start.year();
        bucket.quarter = quarter_of(start);
        bucket.month = start.month();
        bucket.week = start.iso_week().week();
        bucket.day = start.day();
        bucket.duration_minutes_total += activity.duration_minutes_total();
    }

    let mut items: Vec<TimeReportItem> = buckets.into_values().collect();
    items.sort_by(|a, b| b.day.cmp(&a.day));
    items
}

/// Sums activities per project, resolving titles through the lookup.
///
/// Rows are ordered by descending total, ties alphabetically. An activity
/// referencing an unknown project id aborts the aggregation with
/// [`ReportError::ProjectNotFound`].
pub fn sum_by_project(
    activities: &[Activity],
    projects: &ProjectsById,
) -> Result<Vec<ProjectReportItem>, ReportError> {
    let mut totals: HashMap<Uuid, i64> = HashMap::new();
    for activity in activities {
        *totals.entry(activity.project_id).or_insert(0) += activity.duration_minutes_total();
    }

    let mut items = Vec::with_capacity(totals.len());
    for (project_id, duration_minutes_total) in totals {
        let project = projects.get(project_id)?;
        items.push(ProjectReportItem {
            project_id,
            project_title: project.title.clone(),
            duration_minutes_total,
        });
    }

    items.sort_by(|a, b| {
        b.duration_minutes_total
            .cmp(&a.duration_minutes_total)
            .then_with(|| a.project_title.cmp(&b.project_title))
    });
    Ok(items)
}

/// Arithmetic sum of all activities' total minutes, independent of bucketing.
#[must_use]
pub fn total_minutes(activities: &[Activity]) -> i64 {
    activities.iter().map(Activity::duration_minutes_total).sum()
}

/// Orders activities for flat-list display per the filter's sort settings.
///
/// `project` compares resolved titles case-insensitively and therefore needs
/// the lookup; `start` compares start instants. The sort is stable in both
/// directions: ties keep their input order. Without a sort field the input
/// order is returned unchanged.
pub fn sorted_for_display<'a>(
    activities: &'a [Activity],
    filter: &ActivityFilter,
    projects: &ProjectsById,
) -> Result<Vec<&'a Activity>, ReportError> {
    let order = filter.sort_order().unwrap_or(SortOrder::Asc);

    match filter.sort_by() {
        None => Ok(activities.iter().collect()),
        Some(SortField::Start) => {
            let mut sorted: Vec<&Activity> = activities.iter().collect();
            match order {
                SortOrder::Asc => sorted.sort_by(|a, b| a.start.cmp(&b.start)),
                SortOrder::Desc => sorted.sort_by(|a, b| b.start.cmp(&a.start)),
            }
            Ok(sorted)
        }
        Some(SortField::Project) => {
            // resolve titles up front so a missing project surfaces as an error
            let mut keyed: Vec<(String, &Activity)> = Vec::with_capacity(activities.len());
            for activity in activities {
                let title = projects.title(activity.project_id)?;
                keyed.push((title.to_lowercase(), activity));
            }
            match order {
                SortOrder::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
                SortOrder::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
            }
            Ok(keyed.into_iter().map(|(_, activity)| activity).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Timespan;
    use crate::project::Project;
    use chrono::NaiveDateTime;

    fn ts(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn activity(project_id: Uuid, start: NaiveDateTime, minutes: i64) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            start,
            end: start + chrono::Duration::minutes(minutes),
            description: String::new(),
            project_id,
            organization_id: Uuid::new_v4(),
            username: "admin".to_string(),
        }
    }

    fn project(id: Uuid, title: &str) -> Project {
        Project {
            id,
            title: title.to_string(),
            organization_id: Uuid::new_v4(),
        }
    }

    // ========== Day Buckets ==========

    #[test]
    fn sums_activities_per_day_in_descending_day_order() {
        let p = Uuid::new_v4();
        let activities = vec![
            activity(p, ts(9, 5, 9), 60),
            activity(p, ts(9, 5, 14), 30),
            activity(p, ts(9, 7, 9), 45),
        ];

        let items = sum_by_day(&activities);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].day, 7);
        assert_eq!(items[0].duration_minutes_total, 45);
        assert_eq!(items[1].day, 5);
        assert_eq!(items[1].duration_minutes_total, 90);
    }

    #[test]
    fn bucket_carries_its_calendar_context() {
        let p = Uuid::new_v4();
        let items = sum_by_day(&[activity(p, ts(9, 5, 9), 60)]);
        assert_eq!(items[0].year, 2022);
        assert_eq!(items[0].quarter, 3);
        assert_eq!(items[0].month, 9);
        assert_eq!(items[0].week, 36);
        assert_eq!(items[0].as_date(), NaiveDate::from_ymd_opt(2022, 9, 5));
        assert_eq!(items[0].day_formatted().unwrap(), "Monday 05.09.2022");
        assert_eq!(items[0].duration_formatted(), "1:00 h");
    }

    #[test]
    fn same_day_number_in_different_months_shares_a_bucket() {
        // the bucket key is the day-of-month number only; in a multi-month
        // range the 5th of September and the 5th of October merge
        let p = Uuid::new_v4();
        let activities = vec![
            activity(p, ts(9, 5, 9), 60),
            activity(p, ts(10, 5, 9), 30),
        ];

        let items = sum_by_day(&activities);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].day, 5);
        assert_eq!(items[0].duration_minutes_total, 90);
        // representative date is the last activity seen
        assert_eq!(items[0].month, 10);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(sum_by_day(&[]).is_empty());
    }

    // ========== Project Totals ==========

    #[test]
    fn sums_activities_per_project_with_resolved_titles() {
        let maintenance = Uuid::new_v4();
        let support = Uuid::new_v4();
        let projects = ProjectsById::new(&[
            project(maintenance, "Maintenance"),
            project(support, "Support"),
        ]);
        let activities = vec![
            activity(maintenance, ts(9, 5, 9), 60),
            activity(support, ts(9, 5, 11), 90),
            activity(maintenance, ts(9, 6, 9), 15),
        ];

        let items = sum_by_project(&activities, &projects).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].project_title, "Support");
        assert_eq!(items[0].duration_minutes_total, 90);
        assert_eq!(items[1].project_title, "Maintenance");
        assert_eq!(items[1].duration_minutes_total, 75);
        assert_eq!(items[1].duration_formatted(), "1:15 h");
    }

    #[test]
    fn unknown_project_id_reports_not_found() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let projects = ProjectsById::new(&[project(known, "Maintenance")]);
        let activities = vec![
            activity(known, ts(9, 5, 9), 60),
            activity(unknown, ts(9, 5, 11), 30),
        ];

        let err = sum_by_project(&activities, &projects).unwrap_err();
        assert_eq!(err, ReportError::ProjectNotFound(unknown));
    }

    // ========== Report Total ==========

    #[test]
    fn total_is_the_sum_over_all_activities() {
        let p = Uuid::new_v4();
        let activities = vec![
            activity(p, ts(9, 5, 9), 60),
            activity(p, ts(10, 5, 9), 30),
            activity(p, ts(10, 7, 9), 45),
        ];

        // independent of how the buckets partition the set
        let bucketed: i64 = sum_by_day(&activities)
            .iter()
            .map(|item| item.duration_minutes_total)
            .sum();
        assert_eq!(total_minutes(&activities), 135);
        assert_eq!(bucketed, 135);
    }

    #[test]
    fn negative_durations_pass_through_the_total() {
        let p = Uuid::new_v4();
        let activities = vec![activity(p, ts(9, 5, 9), -30), activity(p, ts(9, 5, 11), 60)];
        assert_eq!(total_minutes(&activities), 30);
    }

    // ========== Flat-List Sorting ==========

    fn sort_fixture() -> (Vec<Activity>, ProjectsById) {
        let alpha = Uuid::new_v4();
        let bravo = Uuid::new_v4();
        let projects = ProjectsById::new(&[
            project(alpha, "alpha"),
            project(bravo, "Bravo"),
        ]);
        let activities = vec![
            activity(alpha, ts(9, 7, 9), 60),
            activity(bravo, ts(9, 5, 9), 30),
            activity(alpha, ts(9, 6, 9), 45),
        ];
        (activities, projects)
    }

    #[test]
    fn sorts_by_start_in_both_directions() {
        let (activities, projects) = sort_fixture();
        let base = ActivityFilter::new(Timespan::Month, ts(9, 1, 0));

        let asc = base.with_sort(SortField::Start, SortOrder::Asc);
        let sorted = sorted_for_display(&activities, &asc, &projects).unwrap();
        assert_eq!(sorted[0].start.day(), 5);
        assert_eq!(sorted[2].start.day(), 7);

        let desc = base.with_sort(SortField::Start, SortOrder::Desc);
        let sorted = sorted_for_display(&activities, &desc, &projects).unwrap();
        assert_eq!(sorted[0].start.day(), 7);
        assert_eq!(sorted[2].start.day(), 5);
    }

    #[test]
    fn project_sort_is_case_insensitive_and_stable() {
        let (activities, projects) = sort_fixture();
        let filter = ActivityFilter::new(Timespan::Month, ts(9, 1, 0))
            .with_sort(SortField::Project, SortOrder::Desc);

        let sorted = sorted_for_display(&activities, &filter, &projects).unwrap();
        // "Bravo" > "alpha" case-insensitively; equal titles keep input order
        assert_eq!(sorted[0].start.day(), 5);
        assert_eq!(sorted[1].start.day(), 7);
        assert_eq!(sorted[2].start.day(), 6);
    }

    #[test]
    fn project_sort_surfaces_missing_projects() {
        let unknown = Uuid::new_v4();
        let activities = vec![activity(unknown, ts(9, 5, 9), 60)];
        let filter = ActivityFilter::new(Timespan::Month, ts(9, 1, 0))
            .with_sort(SortField::Project, SortOrder::Asc);

        let err = sorted_for_display(&activities, &filter, &ProjectsById::default()).unwrap_err();
        assert_eq!(err, ReportError::ProjectNotFound(unknown));
    }

    #[test]
    fn no_sort_field_keeps_input_order() {
        let (activities, projects) = sort_fixture();
        let filter = ActivityFilter::new(Timespan::Month, ts(9, 1, 0));
        let sorted = sorted_for_display(&activities, &filter, &projects).unwrap();
        assert_eq!(sorted[0].start.day(), 7);
        assert_eq!(sorted[1].start.day(), 5);
        assert_eq!(sorted[2].start.day(), 6);
    }
}
