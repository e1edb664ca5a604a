use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::meeting::{Meeting, MeetingPayload, MeetingRow},
    stores::trip::title_contains,
};

/// Meetings joined with their trip, aliased to match [`MeetingRow`].
const MEETING_SELECT: &str = "\
    SELECT m.id, m.title, m.description, \
           t.id AS trip_id, t.title AS trip_title, t.description AS trip_description, \
           t.start_trip AS trip_start, t.end_trip AS trip_end \
    FROM meetings m \
    JOIN trips t ON t.id = m.business_trip_id";

#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Meeting>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Meeting>, AppError>;
    async fn insert(&self, payload: MeetingPayload) -> Result<Meeting, AppError>;
    /// Overwrites title, description and trip reference. `None` when no
    /// meeting has this id.
    async fn update(&self, id: i64, payload: MeetingPayload)
        -> Result<Option<Meeting>, AppError>;
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn find_by_title(&self, title: &str) -> Result<Vec<Meeting>, AppError>;
    async fn find_by_trip_id(&self, trip_id: i64) -> Result<Vec<Meeting>, AppError>;
    async fn find_by_title_containing(&self, needle: &str) -> Result<Vec<Meeting>, AppError>;
    async fn find_by_trip_id_ordered_by_title(
        &self,
        trip_id: i64,
    ) -> Result<Vec<Meeting>, AppError>;
}

#[derive(Clone)]
pub struct SqliteMeetingStore {
    db: DbPool,
}

impl SqliteMeetingStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MeetingStore for SqliteMeetingStore {
    async fn find_all(&self) -> Result<Vec<Meeting>, AppError> {
        let query = format!("{MEETING_SELECT} ORDER BY m.id");
        let rows = sqlx::query_as::<_, MeetingRow>(&query)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Meeting>, AppError> {
        let query = format!("{MEETING_SELECT} WHERE m.id = ?");
        let row = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Meeting::from))
    }

    // The write and the joined read share one transaction, so the meeting
    // returned is the row this call wrote.
    async fn insert(&self, payload: MeetingPayload) -> Result<Meeting, AppError> {
        let mut tx = self.db.begin().await?;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO meetings (title, description, business_trip_id) \
             VALUES (?, ?, ?) \
             RETURNING id",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.business_trip.id)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!("{MEETING_SELECT} WHERE m.id = ?");
        let row = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::Other(anyhow!("meeting {id} missing after insert")))?;
        tx.commit().await?;

        Ok(Meeting::from(row))
    }

    async fn update(
        &self,
        id: i64,
        payload: MeetingPayload,
    ) -> Result<Option<Meeting>, AppError> {
        let mut tx = self.db.begin().await?;
        let result = sqlx::query(
            "UPDATE meetings \
             SET title = ?, description = ?, business_trip_id = ? \
             WHERE id = ?",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.business_trip.id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!("{MEETING_SELECT} WHERE m.id = ?");
        let row = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(row.map(Meeting::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Meeting>, AppError> {
        let query = format!("{MEETING_SELECT} WHERE m.title = ? ORDER BY m.id");
        let rows = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(title)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn find_by_trip_id(&self, trip_id: i64) -> Result<Vec<Meeting>, AppError> {
        let query = format!("{MEETING_SELECT} WHERE m.business_trip_id = ? ORDER BY m.id");
        let rows = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(trip_id)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }

    async fn find_by_title_containing(&self, needle: &str) -> Result<Vec<Meeting>, AppError> {
        let needle = needle.to_lowercase();
        let meetings = self.find_all().await?;
        Ok(meetings
            .into_iter()
            .filter(|meeting| title_contains(&meeting.title, &needle))
            .collect())
    }

    async fn find_by_trip_id_ordered_by_title(
        &self,
        trip_id: i64,
    ) -> Result<Vec<Meeting>, AppError> {
        let query = format!(
            "{MEETING_SELECT} WHERE m.business_trip_id = ? ORDER BY m.title ASC, m.id ASC"
        );
        let rows = sqlx::query_as::<_, MeetingRow>(&query)
            .bind(trip_id)
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Meeting::from).collect())
    }
}
