//! Datasets feature module
//!
//! The dataset registry: listing, retrieval, deletion, and the derived
//! summary statistics and chart projections.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

#[cfg(test)]
mod routes_test;

pub use routes::datasets_routes;
