//! Reporting windows: timespans, calendar-correct navigation, and the
//! `t`/`v` query encoding used by frontends.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::clock::Clock;
use crate::error::FilterError;

/// Granularity of a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timespan {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

impl Timespan {
    /// Query token for this timespan (the `t` parameter).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timespan {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "custom" => Ok(Self::Custom),
            _ => Err(FilterError::InvalidTimespan {
                value: s.to_string(),
            }),
        }
    }
}

/// Sort field for flat activity lists.
///
/// Parsing doubles as the boundary validator: anything but "project" or
/// "start" (case-insensitive) is rejected before a filter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Project,
    Start,
}

impl SortField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Start => "start",
        }
    }
}

impl FromStr for SortField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "start" => Ok(Self::Start),
            _ => Err(FilterError::InvalidSortField {
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction for flat activity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(FilterError::InvalidSortOrder {
                value: s.to_string(),
            }),
        }
    }
}

/// An immutable report-window descriptor.
///
/// For non-custom timespans the effective end is always recomputed from the
/// anchor plus one calendar unit, so a filter is self-consistent regardless
/// of how it was constructed. Every transition (`next`, `previous`, `home`,
/// `with_sort_toggle`) returns a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFilter {
    timespan: Timespan,
    start: NaiveDateTime,
    end: NaiveDateTime,
    sort_by: Option<SortField>,
    sort_order: Option<SortOrder>,
}

impl ActivityFilter {
    /// Creates a filter of the given timespan anchored at `start`.
    #[must_use]
    pub const fn new(timespan: Timespan, start: NaiveDateTime) -> Self {
        Self {
            timespan,
            start,
            end: start,
            sort_by: None,
            sort_order: None,
        }
    }

    /// Creates a custom-range filter with an explicit end.
    #[must_use]
    pub const fn custom(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            timespan: Timespan::Custom,
            start,
            end,
            sort_by: None,
            sort_order: None,
        }
    }

    /// The filter for the current period of the given timespan, with the
    /// anchor aligned to the period's first instant.
    pub fn current<C: Clock>(timespan: Timespan, clock: &C) -> Self {
        let today = clock.now().date();
        let start = match timespan {
            Timespan::Day | Timespan::Custom => today,
            Timespan::Week => {
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Timespan::Month => month_start(today),
            Timespan::Quarter => month_start(today) - Months::new(today.month0() % 3),
            Timespan::Year => month_start(today) - Months::new(today.month0()),
        };
        let start = start.and_time(NaiveTime::MIN);
        match timespan {
            Timespan::Custom => Self::custom(start, start + Duration::days(1)),
            _ => Self::new(timespan, start),
        }
    }

    #[must_use]
    pub const fn timespan(&self) -> Timespan {
        self.timespan
    }

    /// The filter's anchor instant.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The filter's exclusive end boundary.
    ///
    /// Recomputed for non-custom timespans as the anchor advanced by exactly
    /// one calendar unit; only custom filters use the stored end.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        match self.timespan {
            Timespan::Custom => self.end,
            Timespan::Day => self.start + Duration::days(1),
            Timespan::Week => self.start + Duration::days(7),
            Timespan::Month => shift_months(self.start, 1),
            Timespan::Quarter => shift_months(self.start, 3),
            Timespan::Year => shift_months(self.start, 12),
        }
    }

    #[must_use]
    pub const fn sort_by(&self) -> Option<SortField> {
        self.sort_by
    }

    #[must_use]
    pub const fn sort_order(&self) -> Option<SortOrder> {
        self.sort_order
    }

    /// A new filter of the same timespan anchored at "now", with the stored
    /// end cleared.
    pub fn home<C: Clock>(&self, clock: &C) -> Self {
        Self::new(self.timespan, clock.now())
    }

    /// The adjacent later window: both boundaries advanced by one unit.
    ///
    /// Custom filters carry their range through unchanged, since no unit
    /// size is known for them.
    #[must_use]
    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    /// The adjacent earlier window: both boundaries moved back by one unit.
    ///
    /// Custom filters carry their range through unchanged.
    #[must_use]
    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    fn shifted(&self, steps: i32) -> Self {
        let mut shifted = self.clone();
        let days = |n: i64| Duration::days(n * i64::from(steps));
        match self.timespan {
            Timespan::Custom => {}
            Timespan::Day => {
                shifted.start += days(1);
                shifted.end += days(1);
            }
            Timespan::Week => {
                shifted.start += days(7);
                shifted.end += days(7);
            }
            Timespan::Month => {
                shifted.start = shift_months(self.start, steps);
                shifted.end = shift_months(self.end, steps);
            }
            Timespan::Quarter => {
                shifted.start = shift_months(self.start, 3 * steps);
                shifted.end = shift_months(self.end, 3 * steps);
            }
            Timespan::Year => {
                shifted.start = shift_months(self.start, 12 * steps);
                shifted.end = shift_months(self.end, 12 * steps);
            }
        }
        shifted
    }

    /// A new filter sorted by `sort_by`, with the direction flipped: ascending
    /// if the current order is descending, descending otherwise (including on
    /// the first toggle).
    #[must_use]
    pub fn with_sort_toggle(&self, sort_by: SortField) -> Self {
        let sort_order = if self.sort_order == Some(SortOrder::Desc) {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        Self {
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            ..self.clone()
        }
    }

    /// A new filter with an explicit sort field and direction.
    #[must_use]
    pub fn with_sort(&self, sort_by: SortField, sort_order: SortOrder) -> Self {
        Self {
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            ..self.clone()
        }
    }

    /// Locale-formatted range for display.
    ///
    /// The end boundary is exclusive, so multi-day spans display the end
    /// minus one day to show an inclusive range.
    #[must_use]
    pub fn string_formatted(&self) -> String {
        match self.timespan {
            Timespan::Custom => format!(
                "{} - {}",
                format_date_short(self.start),
                format_date_short(self.end())
            ),
            Timespan::Day => format_date_short(self.start),
            _ => format!(
                "{} - {}",
                format_date_short(self.start),
                format_date_short(self.end() - Duration::days(1))
            ),
        }
    }

    /// The canonical label for "now" in this filter's timespan, used to
    /// populate default navigation targets without building a full filter.
    ///
    /// Custom ranges have no notion of "now"; they yield their plain token.
    pub fn new_value<C: Clock>(&self, clock: &C) -> String {
        let now = clock.now();
        match self.timespan {
            Timespan::Day => now.format("%Y-%m-%d").to_string(),
            Timespan::Week => {
                let iso = now.iso_week();
                format!("{}-{}", iso.year(), iso.week())
            }
            Timespan::Month => now.format("%Y-%m").to_string(),
            Timespan::Quarter => format!("{}-{}", now.year(), quarter_of(now.date())),
            Timespan::Year => now.format("%Y").to_string(),
            Timespan::Custom => Timespan::Custom.as_str().to_string(),
        }
    }

    /// Reconstructs a filter from the `t`/`v` query encoding.
    ///
    /// A missing `t` defaults to `week`; a missing `v` anchors at the current
    /// period. Parsing a filter and formatting it with [`fmt::Display`]
    /// reproduces the original `v`.
    pub fn from_query<C: Clock>(
        t: Option<&str>,
        v: Option<&str>,
        clock: &C,
    ) -> Result<Self, FilterError> {
        let timespan = match t {
            Some(token) => token.parse()?,
            None => Timespan::Week,
        };
        let filter = match v {
            Some(value) => Self::parse_value(timespan, value)?,
            None => Self::current(timespan, clock),
        };
        tracing::debug!(
            timespan = %filter.timespan,
            start = %filter.start,
            end = %filter.end(),
            "built activity filter"
        );
        Ok(filter)
    }

    fn parse_value(timespan: Timespan, value: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidValue {
            timespan: timespan.as_str(),
            value: value.to_string(),
        };
        match timespan {
            Timespan::Day => {
                let date =
                    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Self::new(timespan, date.and_time(NaiveTime::MIN)))
            }
            Timespan::Week => {
                let (year, week) = value.split_once('-').ok_or_else(invalid)?;
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let week: u32 = week.parse().map_err(|_| invalid())?;
                let monday = NaiveDate::from_isoywd_opt(year, week, chrono::Weekday::Mon)
                    .ok_or_else(invalid)?;
                Ok(Self::new(timespan, monday.and_time(NaiveTime::MIN)))
            }
            Timespan::Month => {
                let date = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
                    .map_err(|_| invalid())?;
                Ok(Self::new(timespan, date.and_time(NaiveTime::MIN)))
            }
            Timespan::Quarter => {
                let (year, quarter) = value.split_once('-').ok_or_else(invalid)?;
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let quarter: u32 = quarter.parse().map_err(|_| invalid())?;
                if !(1..=4).contains(&quarter) {
                    return Err(invalid());
                }
                let date = NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)
                    .ok_or_else(invalid)?;
                Ok(Self::new(timespan, date.and_time(NaiveTime::MIN)))
            }
            Timespan::Year => {
                let year: i32 = value.parse().map_err(|_| invalid())?;
                let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
                Ok(Self::new(timespan, date.and_time(NaiveTime::MIN)))
            }
            Timespan::Custom => {
                let (start, end) = value.split_once('_').ok_or_else(invalid)?;
                let start =
                    NaiveDate::parse_from_str(start, "%Y-%m-%d").map_err(|_| invalid())?;
                let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Self::custom(
                    start.and_time(NaiveTime::MIN),
                    end.and_time(NaiveTime::MIN),
                ))
            }
        }
    }
}

/// Canonical machine-stable label, round-trippable as the `v` query value.
impl fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timespan {
            Timespan::Custom => write!(
                f,
                "{}_{}",
                self.start.format("%Y-%m-%d"),
                self.end().format("%Y-%m-%d")
            ),
            Timespan::Day => write!(f, "{}", self.start.format("%Y-%m-%d")),
            Timespan::Week => {
                let iso = self.start.iso_week();
                write!(f, "{}-{}", iso.year(), iso.week())
            }
            Timespan::Month => write!(f, "{}", self.start.format("%Y-%m")),
            Timespan::Quarter => {
                write!(f, "{}-{}", self.start.year(), quarter_of(self.start.date()))
            }
            Timespan::Year => write!(f, "{}", self.start.format("%Y")),
        }
    }
}

/// Calendar quarter (1-4) of a date.
pub(crate) fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Calendar-aware month shift. Day-of-month is clamped to the target month's
/// length; overflow past the representable range keeps the input unchanged,
/// which only matters at the year limits of `NaiveDate`.
fn shift_months(instant: NaiveDateTime, months: i32) -> NaiveDateTime {
    let shifted = if months >= 0 {
        instant.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        instant.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(instant)
}

fn format_date_short(instant: NaiveDateTime) -> String {
    instant.format("%d.%m.%Y").to_string()
}
