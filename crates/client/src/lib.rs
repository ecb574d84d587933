//! REST client for the KonTask backend.
//!
//! Wraps the supplier profile, availability, document summary and supplier
//! search endpoints with [`reqwest`], and implements the `kontask-core`
//! capability traits on top of them.

pub mod api;
pub mod config;

pub use api::{ApiError, KonTaskApi};
pub use config::ClientConfig;
