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
    models::trip::{BusinessTrip, TripFilter, TripListQuery, TripPayload},
    routes::list_response,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route(
            "/trips/:id",
            get(show_trip).put(update_trip).delete(delete_trip),
        )
}

async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<TripListQuery>,
) -> Result<Response, AppError> {
    let filter = TripFilter::from(query);
    debug!(?filter, "listing trips");
    let trips = match filter {
        TripFilter::All => state.trips.find_all().await?,
        TripFilter::Title(title) => state.trips.find_by_title(&title).await?,
        TripFilter::TitleContains(needle) => {
            state.trips.find_by_title_containing(&needle).await?
        }
        TripFilter::StartBetween(start, end) => {
            state.trips.find_by_start_between(start, end).await?
        }
        TripFilter::EndAfter(after) => state.trips.find_upcoming(after).await?,
    };
    Ok(list_response(trips))
}

async fn show_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BusinessTrip>, AppError> {
    state
        .trips
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<TripPayload>,
) -> Result<(StatusCode, Json<BusinessTrip>), AppError> {
    let trip = state.trips.insert(payload).await?;
    info!(trip_id = trip.id, "trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TripPayload>,
) -> Result<Json<BusinessTrip>, AppError> {
    let trip = state
        .trips
        .update(id, payload)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(trip_id = trip.id, "trip updated");
    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !state.trips.delete(id).await? {
        return Err(AppError::NotFound);
    }
    info!(trip_id = id, "trip deleted");
    Ok(StatusCode::NO_CONTENT)
}
