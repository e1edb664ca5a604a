use std::sync::Arc;

use crate::{
    db::DbPool,
    stores::{MeetingStore, SqliteMeetingStore, SqliteTripStore, TripStore},
};

#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<dyn TripStore>,
    pub meetings: Arc<dyn MeetingStore>,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self {
            trips: Arc::new(SqliteTripStore::new(db.clone())),
            meetings: Arc::new(SqliteMeetingStore::new(db)),
        }
    }
}
