//! Headless supplier profile setup.
//!
//! Reads a [`draft::SetupDraft`] from JSON and drives the setup wizard
//! through to completion against the backend (see [`runner::run`]).

pub mod config;
pub mod draft;
pub mod runner;
