use std::sync::Arc;
use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use crate::domain::{
    models::{identity::CurrentUser, report::{ReportWindow, WeeklyFanReport}},
    ports::FanReportRepository,
};
use crate::error::AppError;
use tracing::{error, info};

pub struct WeeklyReporter {
    repo: Arc<dyn FanReportRepository>,
    timezone: Tz,
    week_start: Weekday,
}

impl WeeklyReporter {
    pub fn new(repo: Arc<dyn FanReportRepository>, timezone: Tz, week_start: Weekday) -> Self {
        Self { repo, timezone, week_start }
    }

    pub fn window_at(&self, now: DateTime<Utc>) -> ReportWindow {
        ReportWindow::current_week(now.with_timezone(&self.timezone), self.week_start)
    }

    /// Runs the three counters concurrently. Any failure discards the others.
    pub async fn report(&self, user: &CurrentUser, now: DateTime<Utc>) -> Result<WeeklyFanReport, AppError> {
        let window = self.window_at(now);
        let user_id = user.user_id.as_deref();
        let email = user.email.as_deref();

        let new_fans = async {
            match user_id {
                Some(id) => self.repo.count_new_fans(id, &window).await,
                None => Ok(0),
            }
        };
        let attended = async {
            match user_id {
                Some(id) => self.repo.count_attended_fans(id, &window).await,
                None => Ok(0),
            }
        };
        let rsvps = async {
            match email {
                Some(email) => self.repo.count_rsvps_for_owner(email, &window).await,
                None => Ok(0),
            }
        };

        let (new_fans_this_week, fans_attended_this_week, rsvps_growth_this_week) =
            tokio::try_join!(new_fans, attended, rsvps).map_err(|e| {
                error!("Weekly report query failed: {}", e);
                AppError::Report(e.to_string())
            })?;

        info!(
            window_start = %window.start,
            window_end = %window.end,
            new_fans_this_week,
            fans_attended_this_week,
            rsvps_growth_this_week,
            "Computed weekly fan report"
        );

        Ok(WeeklyFanReport {
            new_fans_this_week,
            fans_attended_this_week,
            rsvps_growth_this_week,
        })
    }
}
