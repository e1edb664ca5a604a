use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusinessTrip {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_trip: NaiveDateTime,
    pub end_trip: NaiveDateTime,
}

/// Body of `POST /trips` and `PUT /trips/{id}`. An `id` sent by the client
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_trip: NaiveDateTime,
    pub end_trip: NaiveDateTime,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripListQuery {
    pub title: Option<String>,
    pub title_contains: Option<String>,
    pub start_from: Option<NaiveDateTime>,
    pub start_to: Option<NaiveDateTime>,
    pub end_after: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripFilter {
    All,
    Title(String),
    TitleContains(String),
    StartBetween(NaiveDateTime, NaiveDateTime),
    EndAfter(NaiveDateTime),
}

impl From<TripListQuery> for TripFilter {
    fn from(value: TripListQuery) -> Self {
        let TripListQuery {
            title,
            title_contains,
            start_from,
            start_to,
            end_after,
        } = value;
        if let Some(title) = title {
            return TripFilter::Title(title);
        }
        if let Some(needle) = title_contains {
            return TripFilter::TitleContains(needle);
        }
        if let (Some(start), Some(end)) = (start_from, start_to) {
            return TripFilter::StartBetween(start, end);
        }
        match end_after {
            Some(after) => TripFilter::EndAfter(after),
            None => TripFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> NaiveDateTime {
        raw.parse().expect("valid timestamp")
    }

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(TripFilter::from(TripListQuery::default()), TripFilter::All);
    }

    #[test]
    fn exact_title_wins_over_other_filters() {
        let query = TripListQuery {
            title: Some("Zurich Summit".into()),
            title_contains: Some("zurich".into()),
            end_after: Some(ts("2025-01-01T00:00:00")),
            ..Default::default()
        };
        assert_eq!(
            TripFilter::from(query),
            TripFilter::Title("Zurich Summit".into())
        );
    }

    #[test]
    fn half_open_start_range_falls_through() {
        let query = TripListQuery {
            start_from: Some(ts("2025-01-01T00:00:00")),
            end_after: Some(ts("2025-06-01T00:00:00")),
            ..Default::default()
        };
        assert_eq!(
            TripFilter::from(query),
            TripFilter::EndAfter(ts("2025-06-01T00:00:00"))
        );
    }

    #[test]
    fn payload_uses_camel_case_and_ignores_id() {
        let payload: TripPayload = serde_json::from_str(
            r#"{"id":42,"title":"Zurich Summit","startTrip":"2025-09-01T09:00:00","endTrip":"2025-09-03T17:00:00"}"#,
        )
        .expect("payload parses");
        assert_eq!(payload.title, "Zurich Summit");
        assert_eq!(payload.description, None);
        assert_eq!(payload.start_trip, ts("2025-09-01T09:00:00"));
    }

    #[test]
    fn trip_serializes_local_timestamps_without_offset() {
        let trip = BusinessTrip {
            id: 1,
            title: "Zurich Summit".into(),
            description: Some("Q3 review".into()),
            start_trip: ts("2025-09-01T09:00:00"),
            end_trip: ts("2025-09-03T17:00:00"),
        };
        let json = serde_json::to_value(&trip).expect("serializes");
        assert_eq!(json["startTrip"], "2025-09-01T09:00:00");
        assert_eq!(json["endTrip"], "2025-09-03T17:00:00");
    }
}
