use crate::codeforces::{ContestRecord, ContestSource, FetchError};
use crate::config::BotConfig;
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub const NO_CONTESTS_MESSAGE: &str = "No upcoming contests found.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error fetching contests";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Error: Timeout while fetching contests from Codeforces";

// Window of the `next` command, in hours.
const NEXT_WINDOW_HOURS: f64 = 24.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("contest {0} has no start time")]
    MissingStartTime(i64),
    #[error("contest {0} has an invalid start time {1}")]
    InvalidTimestamp(i64, i64),
}

/// Selects upcoming contests and renders them as reply text.
pub struct ContestLister<S> {
    source: S,
    config: BotConfig,
}

impl<S: ContestSource + Send + Sync> ContestLister<S> {
    pub fn new(source: S, config: BotConfig) -> Self {
        Self { source, config }
    }

    /// Fetches the contest list and renders it.
    ///
    /// Errors are never returned; they are turned into a message which can be sent
    /// back to the user as is.
    pub async fn list_contests(&self, show_all: bool) -> String {
        let records = match self.source.fetch_contests().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("failed to fetch contests: {:?}", e);
                return describe_error(&e);
            }
        };

        self.render(&records, show_all, Utc::now())
    }

    /// Renders the records which start within the window as seen from `now`.
    ///
    /// - `show_all == false`: contests starting within 24 hours.
    /// - `show_all == true`: every upcoming contest, bounded by the list window if configured.
    ///
    /// The order of `records` is preserved.
    pub fn render(&self, records: &[ContestRecord], show_all: bool, now: DateTime<Utc>) -> String {
        let now = now.with_timezone(&self.config.timezone);
        let limit_hours = if show_all {
            self.config
                .list_window
                .map(|window| window.num_seconds() as f64 / 3600.0)
        } else {
            Some(NEXT_WINDOW_HOURS)
        };

        let blocks: Vec<String> = records
            .iter()
            .filter(|record| record.is_upcoming())
            .filter_map(|record| {
                let start = match self.start_time(record) {
                    Ok(start) => start,
                    Err(e) => {
                        tracing::warn!("skip contest: {}", e);
                        return None;
                    }
                };
                let hours_until = (start.timestamp() - now.timestamp()) as f64 / 3600.0;

                match limit_hours {
                    Some(limit) if hours_until > limit => None,
                    _ => Some(self.format_block(record, &start)),
                }
            })
            .collect();

        tracing::debug!(
            "{} of {} contests selected (show_all={})",
            blocks.len(),
            records.len(),
            show_all
        );

        if blocks.is_empty() {
            String::from(NO_CONTESTS_MESSAGE)
        } else {
            blocks.join("\n\n")
        }
    }

    fn start_time(&self, record: &ContestRecord) -> Result<DateTime<Tz>, FormatError> {
        let seconds = record
            .start_time_seconds
            .ok_or(FormatError::MissingStartTime(record.id))?;
        let start = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or(FormatError::InvalidTimestamp(record.id, seconds))?;

        Ok(start.with_timezone(&self.config.timezone))
    }

    fn format_block(&self, record: &ContestRecord, start: &DateTime<Tz>) -> String {
        format!(
            "🏆 {}\n⏰ Start Time: {}\n⏳ Duration: {} hours\n🔗 Register at: {}\n",
            record.name,
            start.format("%d %b %Y, %I:%M %p %Z"),
            record.duration_seconds / 3600,
            self.config.registration_url(record.id)
        )
    }
}

pub fn describe_error(e: &FetchError) -> String {
    match e {
        FetchError::Timeout => String::from(TIMEOUT_ERROR_MESSAGE),
        FetchError::Upstream(_) => String::from(UPSTREAM_ERROR_MESSAGE),
        e => format!("Error: {}", e),
    }
}
