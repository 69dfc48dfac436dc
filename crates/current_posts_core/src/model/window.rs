//! "Recent" time window computation.
//!
//! The window starts at local midnight two calendar days before `now` and
//! ends at `now` itself, so its length grows with the time of day.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::Serialize;

/// Calendar days reaching back from today's date.
pub const RECENT_WINDOW_DAYS: u64 = 2;

const DST_GAP_STEP_MINUTES: i64 = 15;
const DST_GAP_MAX_STEPS: i64 = 24 * 60 / DST_GAP_STEP_MINUTES;

/// Closed interval `[start, end]` of creation instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Computes the recent-items window for `now`.
    ///
    /// "Today" is the calendar date of `now` in its own time zone.
    pub fn recent<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let start_date = today
            .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        let start = local_midnight(&now.timezone(), start_date);

        Self {
            start: start.with_timezone(&Utc),
            end: now.with_timezone(&Utc),
        }
    }

    /// Returns whether `instant` falls inside the window, both ends included.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// First instant of `date` in `tz`.
///
/// Ambiguous midnights resolve to the earlier instant. When midnight falls in
/// a DST gap the first representable local time after it is used.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=DST_GAP_MAX_STEPS)
        .find_map(|step| {
            let candidate = midnight + TimeDelta::minutes(step * DST_GAP_STEP_MINUTES);
            tz.from_local_datetime(&candidate).earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
