use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{
    db::DbPool,
    error::AppError,
    models::trip::{BusinessTrip, TripPayload},
};

const TRIP_COLUMNS: &str = "id, title, description, start_trip, end_trip";

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<BusinessTrip>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BusinessTrip>, AppError>;
    async fn insert(&self, payload: TripPayload) -> Result<BusinessTrip, AppError>;
    /// Overwrites the four mutable fields. `None` when no trip has this id.
    async fn update(&self, id: i64, payload: TripPayload)
        -> Result<Option<BusinessTrip>, AppError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn find_by_title(&self, title: &str) -> Result<Vec<BusinessTrip>, AppError>;
    /// Trips with `start <= start_trip <= end`.
    async fn find_by_start_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<BusinessTrip>, AppError>;
    async fn find_by_title_containing(&self, needle: &str)
        -> Result<Vec<BusinessTrip>, AppError>;
    /// Trips whose end is strictly later than `after`.
    async fn find_upcoming(&self, after: NaiveDateTime) -> Result<Vec<BusinessTrip>, AppError>;
}

#[derive(Clone)]
pub struct SqliteTripStore {
    db: DbPool,
}

impl SqliteTripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TripStore for SqliteTripStore {
    async fn find_all(&self) -> Result<Vec<BusinessTrip>, AppError> {
        let query = format!("SELECT {TRIP_COLUMNS} FROM trips ORDER BY id");
        let trips = sqlx::query_as::<_, BusinessTrip>(&query)
            .fetch_all(&self.db)
            .await?;
        Ok(trips)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BusinessTrip>, AppError> {
        let query = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?");
        let trip = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(trip)
    }

    async fn insert(&self, payload: TripPayload) -> Result<BusinessTrip, AppError> {
        let query = format!(
            "INSERT INTO trips (title, description, start_trip, end_trip) \
             VALUES (?, ?, ?, ?) \
             RETURNING {TRIP_COLUMNS}"
        );
        let trip = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.start_trip)
            .bind(payload.end_trip)
            .fetch_one(&self.db)
            .await?;
        Ok(trip)
    }

    async fn update(
        &self,
        id: i64,
        payload: TripPayload,
    ) -> Result<Option<BusinessTrip>, AppError> {
        let query = format!(
            "UPDATE trips \
             SET title = ?, description = ?, start_trip = ?, end_trip = ? \
             WHERE id = ? \
             RETURNING {TRIP_COLUMNS}"
        );
        let trip = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.start_trip)
            .bind(payload.end_trip)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(trip)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<BusinessTrip>, AppError> {
        let query = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE title = ? ORDER BY id");
        let trips = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(title)
            .fetch_all(&self.db)
            .await?;
        Ok(trips)
    }

    async fn find_by_start_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<BusinessTrip>, AppError> {
        let query = format!(
            "SELECT {TRIP_COLUMNS} FROM trips \
             WHERE start_trip BETWEEN ? AND ? \
             ORDER BY id"
        );
        let trips = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(start)
            .bind(end)
            .fetch_all(&self.db)
            .await?;
        Ok(trips)
    }

    async fn find_by_title_containing(
        &self,
        needle: &str,
    ) -> Result<Vec<BusinessTrip>, AppError> {
        // SQLite's lower() folds ASCII only, so the match runs here.
        let needle = needle.to_lowercase();
        let trips = self.find_all().await?;
        Ok(trips
            .into_iter()
            .filter(|trip| title_contains(&trip.title, &needle))
            .collect())
    }

    async fn find_upcoming(&self, after: NaiveDateTime) -> Result<Vec<BusinessTrip>, AppError> {
        let query = format!("SELECT {TRIP_COLUMNS} FROM trips WHERE end_trip > ? ORDER BY id");
        let trips = sqlx::query_as::<_, BusinessTrip>(&query)
            .bind(after)
            .fetch_all(&self.db)
            .await?;
        Ok(trips)
    }
}

/// Case-insensitive substring test; `needle` must already be lowercased.
pub(crate) fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}
