use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    api::{auth::RequireUser, error::ApiError},
    app::AppState,
    db::EventRecord,
    services,
};

#[derive(Deserialize)]
pub struct CalendarQuery {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct EventView {
    pub id: i64,
    pub title: String,
    pub location: Option<String>,
    pub when: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
}

pub(crate) fn event_view(event: EventRecord) -> Result<EventView, ApiError> {
    let when = services::format_when(&event).map_err(|e| {
        tracing::error!(error = %e, "failed to format event");
        ApiError::internal()
    })?;

    Ok(EventView {
        id: event.id,
        title: event.title,
        location: event.location,
        when,
        starts_at: event.starts_at,
        ends_at: event.ends_at,
    })
}

fn parse_bound(raw: Option<String>) -> Result<Option<OffsetDateTime>, ApiError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    OffsetDateTime::parse(&raw, &Rfc3339)
        .map(Some)
        .map_err(|_| {
            ApiError::public(
                StatusCode::BAD_REQUEST,
                "Calendar bounds must be RFC 3339 timestamps",
            )
        })
}

/// Events in the requested window, defaulting to the current week.
pub async fn list_events(
    RequireUser(account): RequireUser,
    State(app): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Response, ApiError> {
    let (week_from, week_to) = services::week_window(OffsetDateTime::now_utc());

    let from = parse_bound(query.from)?.unwrap_or(week_from);
    let to = parse_bound(query.to)?.unwrap_or(week_to);
    if from >= to {
        return Err(ApiError::public(
            StatusCode::BAD_REQUEST,
            "Calendar window is empty",
        ));
    }

    let events = services::events_in_window(account.id(), from, to, app.directory.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to list events");
            ApiError::internal()
        })?;

    let views = events
        .into_iter()
        .map(event_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((StatusCode::OK, Json(views)).into_response())
}
