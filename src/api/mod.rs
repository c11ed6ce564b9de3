//! Remote recipe API: domain types, wire DTOs, and the HTTP client.

pub mod api_types;
pub mod client;
pub mod types;
