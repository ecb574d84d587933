//! KonTask domain core.
//!
//! State and rules for the supplier profile-setup wizard and the
//! post-matching flow, plus the post and profile records the backend
//! returns. No I/O lives here: backend calls are reached through
//! the capability traits in [`sync`] and [`post_matching`], implemented by
//! `kontask-client`.

pub mod availability;
pub mod error;
pub mod post_matching;
pub mod posts;
pub mod profile;
pub mod roles;
pub mod setup;
pub mod sync;
pub mod types;
pub mod wizard;
