//! Output sinks for fetched news.
//!
//! # Submodules
//!
//! - [`json`]: Writes [`NewsEnvelope`](crate::models::NewsEnvelope) files
//!   keyed by company slug or ticker
//!
//! The HTTP sink lives in [`crate::server`].

pub mod json;
