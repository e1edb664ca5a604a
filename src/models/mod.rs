pub mod meeting;
pub mod trip;
