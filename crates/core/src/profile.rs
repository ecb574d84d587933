//! Account profile and resume records kept by the backend.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// A user account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub experience_description: String,
    #[serde(default = "default_rating")]
    pub rating: i32,
    #[serde(default)]
    pub is_supplier: bool,
    /// Only meaningful for suppliers.
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: Timestamp,
}

fn default_rating() -> i32 {
    4
}

impl UserProfile {
    /// Name to show, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// A resume document already uploaded to file storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResume {
    pub resume_public_id: String,
    pub resume_title: String,
    pub resume_pdf_url: String,
}

/// Body of the resume creation call: the owner plus the resume fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateResumeRequest<'a> {
    pub user_id: &'a str,
    #[serde(flatten)]
    pub resume: &'a NewResume,
}

/// A stored resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub user_id: String,
    pub resume_public_id: String,
    #[serde(default)]
    pub resume_title: String,
    #[serde(default)]
    pub resume_pdf_url: String,
}
