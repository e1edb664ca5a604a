use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::trip::BusinessTrip;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub business_trip: BusinessTrip,
}

/// Reference to the parent trip as sent by clients: `{"id": 1}`. Any other
/// trip fields in the object are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub business_trip: TripRef,
}

/// A meeting joined with its trip, one column set per table.
#[derive(Debug, FromRow)]
pub struct MeetingRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub trip_id: i64,
    pub trip_title: String,
    pub trip_description: Option<String>,
    pub trip_start: NaiveDateTime,
    pub trip_end: NaiveDateTime,
}

impl From<MeetingRow> for Meeting {
    fn from(value: MeetingRow) -> Self {
        let MeetingRow {
            id,
            title,
            description,
            trip_id,
            trip_title,
            trip_description,
            trip_start,
            trip_end,
        } = value;
        Meeting {
            id,
            title,
            description,
            business_trip: BusinessTrip {
                id: trip_id,
                title: trip_title,
                description: trip_description,
                start_trip: trip_start,
                end_trip: trip_end,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingListQuery {
    pub by_trip: Option<i64>,
    pub order_by: Option<MeetingOrder>,
    pub title: Option<String>,
    pub title_contains: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingOrder {
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingFilter {
    All,
    Trip(i64),
    TripOrderedByTitle(i64),
    Title(String),
    TitleContains(String),
}

impl From<MeetingListQuery> for MeetingFilter {
    fn from(value: MeetingListQuery) -> Self {
        let MeetingListQuery {
            by_trip,
            order_by,
            title,
            title_contains,
        } = value;
        if let Some(trip_id) = by_trip {
            return match order_by {
                Some(MeetingOrder::Title) => MeetingFilter::TripOrderedByTitle(trip_id),
                None => MeetingFilter::Trip(trip_id),
            };
        }
        if let Some(title) = title {
            return MeetingFilter::Title(title);
        }
        match title_contains {
            Some(needle) => MeetingFilter::TitleContains(needle),
            None => MeetingFilter::All,
        }
    }
}
