//! HTTP client for the KonTask backend endpoints.
//!
//! Wraps the supplier endpoints (profile update, availability replacement,
//! document summary upload), the supplier search, post browsing and the
//! account profile/resume endpoints using [`reqwest`].

use async_trait::async_trait;
use kontask_core::post_matching::{MatchResponse, SupplierMatcher};
use kontask_core::posts::Post;
use kontask_core::profile::{CreateResumeRequest, NewResume, Resume, UserProfile};
use kontask_core::setup::SourceDocument;
use kontask_core::sync::{
    AvailabilityEntry, DocumentSummarizer, DocumentSummary, ProfilePayload, SupplierSync,
    SyncError,
};

use crate::config::ClientConfig;

/// HTTP client for one KonTask backend.
#[derive(Debug, Clone)]
pub struct KonTaskApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decode, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("KonTask API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<ApiError> for SyncError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(e) => SyncError::Transport(e.to_string()),
            ApiError::Status { status, body } => SyncError::Rejected { status, body },
        }
    }
}

impl KonTaskApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client honouring the configured base URL and timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_server.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Replace a supplier's profile fields.
    ///
    /// Sends `PUT /suppliers/{id}/profile`.
    pub async fn update_profile(
        &self,
        supplier_id: &str,
        payload: &ProfilePayload,
    ) -> Result<(), ApiError> {
        tracing::debug!(supplier_id, "PUT supplier profile");
        let response = self
            .client
            .put(self.url(&format!("/suppliers/{supplier_id}/profile")))
            .json(payload)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Replace a supplier's weekly availability.
    ///
    /// Sends `POST /suppliers/{id}/availability` with one entry per weekday.
    pub async fn update_availability(
        &self,
        supplier_id: &str,
        slots: &[AvailabilityEntry],
    ) -> Result<(), ApiError> {
        tracing::debug!(supplier_id, entries = slots.len(), "POST supplier availability");
        let response = self
            .client
            .post(self.url(&format!("/suppliers/{supplier_id}/availability")))
            .json(slots)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Upload a document and get back the extracted profile details.
    ///
    /// Sends `POST /suppliers/{id}/upload_pdf_summary` as multipart form
    /// data with a single `file` part.
    pub async fn upload_pdf_summary(
        &self,
        supplier_id: &str,
        document: &SourceDocument,
    ) -> Result<DocumentSummary, ApiError> {
        tracing::debug!(
            supplier_id,
            file = %document.file_name,
            bytes = document.bytes.len(),
            "Uploading document for summary"
        );
        let part = reqwest::multipart::Part::bytes(document.bytes.clone())
            .file_name(document.file_name.clone())
            .mime_str(document.mime_type())?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("/suppliers/{supplier_id}/upload_pdf_summary")))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Search suppliers matching a post's text.
    ///
    /// Sends `POST /search_for_supplier/`.
    pub async fn search_for_supplier(
        &self,
        query: &str,
        requester_id: &str,
    ) -> Result<MatchResponse, ApiError> {
        let body = serde_json::json!({
            "query": query,
            "requester_id": requester_id,
        });

        let response = self
            .client
            .post(self.url("/search_for_supplier/"))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- posts ----

    /// List the posts a requester created.
    ///
    /// Sends `GET /posts/user/{id}`.
    pub async fn list_posts_by_user(&self, requester_id: &str) -> Result<Vec<Post>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/posts/user/{requester_id}")))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch a single post.
    ///
    /// Sends `GET /posts/{post_id}`.
    pub async fn get_post(&self, post_id: &str) -> Result<Post, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/posts/{post_id}")))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- account profile ----

    /// Sends `GET /get_user/{id}`.
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/get_user/{user_id}")))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Sends `GET /get_resume/{id}`.
    pub async fn get_resume(&self, user_id: &str) -> Result<Resume, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/get_resume/{user_id}")))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Register an uploaded resume for a user.
    ///
    /// Sends `POST /create_resume` with the user id and resume fields.
    pub async fn create_resume(
        &self,
        user_id: &str,
        resume: &NewResume,
    ) -> Result<Resume, ApiError> {
        tracing::debug!(user_id, title = %resume.resume_title, "Creating resume");
        let body = CreateResumeRequest { user_id, resume };
        let response = self
            .client
            .post(self.url("/create_resume"))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Ask the backend to refresh a user's resume.
    ///
    /// Sends `POST /update_resume`; the body is the user id as a JSON string.
    pub async fn update_resume(&self, user_id: &str) -> Result<Resume, ApiError> {
        let response = self
            .client
            .post(self.url("/update_resume"))
            .json(&user_id)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`ApiError::Status`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "KonTask API error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Capability impls
// ---------------------------------------------------------------------------

#[async_trait]
impl SupplierSync for KonTaskApi {
    async fn submit_profile(
        &self,
        supplier_id: &str,
        payload: &ProfilePayload,
    ) -> Result<(), SyncError> {
        Ok(self.update_profile(supplier_id, payload).await?)
    }

    async fn submit_availability(
        &self,
        supplier_id: &str,
        slots: &[AvailabilityEntry],
    ) -> Result<(), SyncError> {
        Ok(self.update_availability(supplier_id, slots).await?)
    }
}

#[async_trait]
impl DocumentSummarizer for KonTaskApi {
    async fn summarize(
        &self,
        supplier_id: &str,
        document: &SourceDocument,
    ) -> Result<DocumentSummary, SyncError> {
        Ok(self.upload_pdf_summary(supplier_id, document).await?)
    }
}

#[async_trait]
impl SupplierMatcher for KonTaskApi {
    async fn match_post(
        &self,
        query: &str,
        requester_id: &str,
    ) -> Result<MatchResponse, SyncError> {
        Ok(self.search_for_supplier(query, requester_id).await?)
    }
}
