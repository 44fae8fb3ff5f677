pub mod events_api;
pub mod ingestion;
pub mod media;
