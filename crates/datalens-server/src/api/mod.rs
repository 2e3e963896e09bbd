//! HTTP API surface shared types

pub mod response;
