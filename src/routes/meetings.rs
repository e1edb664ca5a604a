use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::meeting::{Meeting, MeetingFilter, MeetingListQuery, MeetingPayload},
    routes::list_response,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meetings", get(list_meetings).post(create_meeting))
        .route(
            "/meetings/:id",
            get(show_meeting).put(update_meeting).delete(delete_meeting),
        )
}

async fn list_meetings(
    State(state): State<AppState>,
    Query(query): Query<MeetingListQuery>,
) -> Result<Response, AppError> {
    let filter = MeetingFilter::from(query);
    debug!(?filter, "listing meetings");
    let meetings = match filter {
        MeetingFilter::All => state.meetings.find_all().await?,
        MeetingFilter::Trip(trip_id) => state.meetings.find_by_trip_id(trip_id).await?,
        MeetingFilter::TripOrderedByTitle(trip_id) => {
            state
                .meetings
                .find_by_trip_id_ordered_by_title(trip_id)
                .await?
        }
        MeetingFilter::Title(title) => state.meetings.find_by_title(&title).await?,
        MeetingFilter::TitleContains(needle) => {
            state.meetings.find_by_title_containing(&needle).await?
        }
    };
    Ok(list_response(meetings))
}

async fn show_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Meeting>, AppError> {
    state
        .meetings
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_meeting(
    State(state): State<AppState>,
    Json(payload): Json<MeetingPayload>,
) -> Result<(StatusCode, Json<Meeting>), AppError> {
    let meeting = state.meetings.insert(payload).await?;
    info!(
        meeting_id = meeting.id,
        trip_id = meeting.business_trip.id,
        "meeting created"
    );
    Ok((StatusCode::CREATED, Json(meeting)))
}

// The referenced trip is not looked up first; the foreign key rejects
// dangling references with a conflict.
async fn update_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MeetingPayload>,
) -> Result<Json<Meeting>, AppError> {
    let meeting = state
        .meetings
        .update(id, payload)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(meeting_id = meeting.id, "meeting updated");
    Ok(Json(meeting))
}

async fn delete_meeting(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.meetings.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!(meeting_id = id, "meeting deleted");
    Ok(StatusCode::NO_CONTENT)
}
