//! Task posts as listed by the backend.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Status the backend gives a post that still takes offers.
pub const STATUS_OPEN: &str = "open";

/// A task post created by a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Category assigned by the backend's classifier.
    pub category: String,
    /// `open`, `accepted`, `completed`, ...
    pub status: String,
    pub requester_id: String,
    #[serde(default)]
    pub offers: u32,
    #[serde(default)]
    pub views: u32,
    pub created_at: Timestamp,
}

impl Post {
    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_OPEN)
    }
}

/// Open posts first, then newest first.
pub fn sort_for_listing(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.is_open()
            .cmp(&a.is_open())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
