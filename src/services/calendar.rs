use anyhow::Context;
use time::{Duration, OffsetDateTime};

use crate::{
    db::{Directory, EventRecord},
    domain::UserId,
    services::ServiceError,
};

/// The week `now` falls in: Monday midnight UTC up to the next Monday.
pub fn week_window(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let date = now.date();
    let days_into_week = date.weekday().number_days_from_monday() as i64;

    let monday = date.saturating_sub(Duration::days(days_into_week));
    let from = monday.midnight().assume_utc();

    (from, from + Duration::days(7))
}

#[tracing::instrument(name = "services::events_in_window", skip(directory))]
pub async fn events_in_window(
    user_id: UserId,
    from: OffsetDateTime,
    to: OffsetDateTime,
    directory: &dyn Directory,
) -> Result<Vec<EventRecord>, ServiceError> {
    let events = directory.events_between(user_id, from, to).await?;

    Ok(events)
}

/// Human-readable slot for an event, e.g. "Mon 31 Aug, 10:00 - 11:30".
pub fn format_when(event: &EventRecord) -> Result<String, ServiceError> {
    let day_format =
        time::macros::format_description!("[weekday repr:short] [day] [month repr:short]");
    let time_format = time::macros::format_description!("[hour]:[minute]");

    let day = event
        .starts_at
        .format(&day_format)
        .context("formatting event day failed")?;
    let starts = event
        .starts_at
        .format(&time_format)
        .context("formatting event start time failed")?;
    let ends = event
        .ends_at
        .format(&time_format)
        .context("formatting event end time failed")?;

    Ok(format!("{day}, {starts} - {ends}"))
}
