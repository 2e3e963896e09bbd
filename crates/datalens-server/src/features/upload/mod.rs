//! Upload feature module
//!
//! Multipart CSV upload and the ingestion command behind it.

pub mod commands;
pub mod routes;


pub use routes::upload_routes;
