pub mod meeting;
pub mod trip;

pub use meeting::{MeetingStore, SqliteMeetingStore};
pub use trip::{SqliteTripStore, TripStore};
