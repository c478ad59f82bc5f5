//! Collapses the 3-hourly forecast list into one representative sample per
//! calendar day.
//!
//! Grouping uses the sample's UTC calendar date; the representative is the
//! first sample of a day taken at or after [`MORNING_HOUR`] on the caller's
//! clock. Days whose samples all fall before that cutoff keep an explicit
//! `None`, and downstream rendering decides what to show for them.

use chrono::{FixedOffset, NaiveDate, Timelike};

use crate::model::ForecastEntry;

/// Earliest local hour considered a displayable daytime sample.
pub const MORNING_HOUR: u32 = 4;

/// The sample chosen to stand for one calendar date.
#[derive(Debug, Clone)]
pub struct DailySummary<'a> {
    /// UTC calendar date the summary covers.
    pub date: NaiveDate,
    /// First morning-or-later sample of that date, if any exists.
    pub representative: Option<&'a ForecastEntry>,
}

/// Groups `entries` by UTC calendar date, preserving the order in which each
/// date first appears, and picks the representative per date.
///
/// `offset` is the clock used for the morning cutoff; the dashboard passes
/// the forecast city's own UTC offset. Duplicate timestamps are kept as
/// separate entries, never deduplicated.
pub fn daily_summaries(
    entries: &[ForecastEntry],
    offset: FixedOffset,
) -> Vec<DailySummary<'_>> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for entry in entries {
        let date = entry.dt.date_naive();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    dates
        .into_iter()
        .map(|date| DailySummary {
            date,
            representative: entries.iter().find(|entry| {
                entry.dt.date_naive() == date
                    && entry.dt.with_timezone(&offset).hour() >= MORNING_HOUR
            }),
        })
        .collect()
}
