//! Report command summarizing a period by day and by project.
//!
//! This module implements `wl report` with the `t`/`v` period selection and
//! two output formats (human-readable, JSON).

use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use wl_core::{
    ActivityFilter, ActivityRepository, PageParams, ProjectReportItem, ProjectRepository,
    ProjectsById, SystemClock, TimeReportItem, format_minutes_as_duration, sum_by_day,
    sum_by_project, total_minutes,
};

use crate::store::JsonStore;

/// Reports fetch at most this many activities from the store.
const REPORT_PAGE_SIZE: usize = 500;

/// Computed report data for one filter window.
#[derive(Debug)]
pub struct ReportData {
    pub timespan: &'static str,
    pub value: String,
    pub range_formatted: String,
    pub by_day: Vec<TimeReportItem>,
    pub by_project: Vec<ProjectReportItem>,
    pub total_minutes: i64,
}

/// Generates report data from the store.
pub fn generate_report_data(store: &JsonStore, filter: &ActivityFilter) -> Result<ReportData> {
    let page = PageParams {
        page: 0,
        size: REPORT_PAGE_SIZE,
    };
    let activities = store.find_activities(filter, &page)?;
    let projects: ProjectsById = store
        .find_projects(store.organization_id(), &PageParams::default())?
        .into_iter()
        .collect();

    let by_day = sum_by_day(&activities);
    let by_project = sum_by_project(&activities, &projects)
        .context("activity references an unknown project")?;

    Ok(ReportData {
        timespan: filter.timespan().as_str(),
        value: filter.to_string(),
        range_formatted: filter.string_formatted(),
        by_day,
        by_project,
        total_minutes: total_minutes(&activities),
    })
}

/// Formats the human-readable report output.
#[allow(clippy::cast_precision_loss)]
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "ACTIVITY REPORT: {} ({})",
        data.value, data.range_formatted
    )
    .unwrap();

    if data.by_day.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No activities found in {}.", data.value).unwrap();
        return output;
    }

    writeln!(output).unwrap();
    writeln!(output, "BY DAY").unwrap();
    writeln!(output, "──────").unwrap();
    for item in &data.by_day {
        let label = item
            .day_formatted()
            .unwrap_or_else(|| format!("day {}", item.day));
        writeln!(output, "{label:<24}{:>8}", item.duration_formatted()).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BY PROJECT").unwrap();
    writeln!(output, "──────────").unwrap();
    for item in &data.by_project {
        writeln!(
            output,
            "{:<24}{:>8}",
            item.project_title,
            item.duration_formatted()
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "TOTAL: {}",
        format_minutes_as_duration(data.total_minutes as f64)
    )
    .unwrap();

    output
}

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    timespan: &'a str,
    value: &'a str,
    range: &'a str,
    by_day: &'a [TimeReportItem],
    by_project: &'a [ProjectReportItem],
    total_minutes: i64,
    total_formatted: String,
}

/// Formats report data as JSON.
#[allow(clippy::cast_precision_loss)]
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let report = JsonReport {
        timespan: data.timespan,
        value: &data.value,
        range: &data.range_formatted,
        by_day: &data.by_day,
        by_project: &data.by_project,
        total_minutes: data.total_minutes,
        total_formatted: format_minutes_as_duration(data.total_minutes as f64),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the report command.
pub fn run(
    store: &JsonStore,
    timespan: Option<&str>,
    value: Option<&str>,
    json: bool,
) -> Result<()> {
    let filter = ActivityFilter::from_query(timespan, value, &SystemClock)
        .context("invalid report period")?;
    let data = generate_report_data(store, &filter)?;

    if json {
        println!("{}", format_report_json(&data)?);
    } else {
        print!("{}", format_report(&data));
    }
    Ok(())
}
