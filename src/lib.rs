pub mod advisor;
pub mod api;
pub mod core;
pub mod enrich;
pub mod error;
