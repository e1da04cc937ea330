use serde::{Deserialize, Serialize};
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeeklyFanReport {
    pub new_fans_this_week: i64,
    pub fans_attended_this_week: i64,
    pub rsvps_growth_this_week: i64,
}

/// Inclusive instant range `[start, end]` covering one calendar week.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The week containing `now`, measured in the zone of `now`.
    /// Runs from `week_start` 00:00:00 through the sixth following day at 23:59:59.999.
    pub fn current_week(now: DateTime<Tz>, week_start: Weekday) -> Self {
        let tz = now.timezone();
        let days_back = (now.weekday().num_days_from_monday() + 7
            - week_start.num_days_from_monday()) % 7;
        let first_day = now.date_naive() - Duration::days(days_back as i64);
        let last_day = first_day + Duration::days(6);

        let start = local_instant(&tz, first_day.and_time(NaiveTime::MIN));
        let end = local_instant(&tz, end_of_day(last_day));
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

// Ambiguous local times take the earlier instant; times inside a DST gap move past it.
fn local_instant(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // Wednesday
        let now = utc(2024, 3, 6, 12, 30, 0).with_timezone(&chrono_tz::UTC);
        let window = ReportWindow::current_week(now, Weekday::Mon);
        assert_eq!(window.start, utc(2024, 3, 4, 0, 0, 0));
        assert!(window.contains(utc(2024, 3, 10, 23, 59, 59)));
        assert!(!window.contains(utc(2024, 3, 11, 0, 0, 0)));
    }

    #[test]
    fn boundaries_are_inclusive() {
        let now = utc(2024, 3, 4, 0, 0, 0).with_timezone(&chrono_tz::UTC);
        let window = ReportWindow::current_week(now, Weekday::Mon);
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(window.start - Duration::seconds(1)));
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        let now = utc(2024, 3, 10, 22, 0, 0).with_timezone(&chrono_tz::UTC);
        let window = ReportWindow::current_week(now, Weekday::Mon);
        assert_eq!(window.start, utc(2024, 3, 4, 0, 0, 0));
    }

    #[test]
    fn week_is_computed_in_the_reference_zone() {
        // Monday 01:00 in Berlin is still Sunday in UTC.
        let now = utc(2024, 3, 4, 0, 0, 0).with_timezone(&chrono_tz::Europe::Berlin);
        let window = ReportWindow::current_week(now, Weekday::Mon);
        assert_eq!(window.start, utc(2024, 3, 3, 23, 0, 0));
    }

    #[test]
    fn configurable_week_start() {
        let now = utc(2024, 3, 6, 12, 0, 0).with_timezone(&chrono_tz::UTC);
        let window = ReportWindow::current_week(now, Weekday::Sun);
        assert_eq!(window.start, utc(2024, 3, 3, 0, 0, 0));
        assert!(window.contains(utc(2024, 3, 9, 23, 59, 59)));
        assert!(!window.contains(utc(2024, 3, 10, 0, 0, 0)));
    }
}
