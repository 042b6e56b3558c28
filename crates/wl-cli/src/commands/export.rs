//! Export command writing the activities of a period as CSV.

use std::io::Write;

use anyhow::{Context, Result};
use wl_core::{
    Activity, ActivityFilter, ActivityRepository, PageParams, ProjectRepository, ProjectsById,
    SortField, SortOrder, SystemClock, sorted_for_display,
};

use crate::store::JsonStore;

/// Exports fetch at most this many activities from the store.
const EXPORT_PAGE_SIZE: usize = 5000;

/// Quotes a CSV field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the sorted activity list as CSV with a header row.
pub fn format_csv(activities: &[&Activity], projects: &ProjectsById) -> Result<String> {
    let mut output = String::from("date,start,end,project,duration,description\n");
    for activity in activities {
        let title = projects
            .title(activity.project_id)
            .context("activity references an unknown project")?;
        output.push_str(&format!(
            "{},{},{},{},{:.2},{}\n",
            activity.start.format("%Y-%m-%d"),
            activity.start.format("%H:%M"),
            activity.end.format("%H:%M"),
            csv_field(title),
            activity.duration_decimal(),
            csv_field(&activity.description),
        ));
    }
    Ok(output)
}

/// Runs the export command.
pub fn run(
    store: &JsonStore,
    timespan: Option<&str>,
    value: Option<&str>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> Result<()> {
    let mut filter = ActivityFilter::from_query(timespan, value, &SystemClock)
        .context("invalid export period")?;
    if let Some(field) = sort_by {
        let field: SortField = field.parse().context("invalid sort field")?;
        let order = match sort_order {
            Some(token) => token.parse().context("invalid sort order")?,
            None => SortOrder::Asc,
        };
        filter = filter.with_sort(field, order);
    }

    let page = PageParams {
        page: 0,
        size: EXPORT_PAGE_SIZE,
    };
    let activities = store.find_activities(&filter, &page)?;
    let projects: ProjectsById = store
        .find_projects(store.organization_id(), &PageParams::default())?
        .into_iter()
        .collect();
    let sorted = sorted_for_display(&activities, &filter, &projects)
        .context("activity references an unknown project")?;

    let csv = format_csv(&sorted, &projects)?;
    std::io::stdout()
        .write_all(csv.as_bytes())
        .context("failed to write export")?;
    Ok(())
}
