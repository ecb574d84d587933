//! In-process mock of the KonTask backend for client integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Supplier id the mock answers 404 for.
pub const UNKNOWN_SUPPLIER: &str = "missing";

/// Post id the mock answers 404 for.
pub const UNKNOWN_POST: &str = "missing-post";

/// One request seen by the mock: endpoint name, supplier id, body.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub endpoint: &'static str,
    pub supplier_id: String,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<&'static str> {
        self.requests().iter().map(|r| r.endpoint).collect()
    }

    fn record(&self, endpoint: &'static str, supplier_id: &str, body: Value) {
        self.requests.lock().unwrap().push(Recorded {
            endpoint,
            supplier_id: supplier_id.to_string(),
            body,
        });
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "User not found" })),
    )
        .into_response()
}

async fn update_profile(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.record("profile", &id, body.clone());
    if id == UNKNOWN_SUPPLIER {
        return not_found();
    }
    Json(json!({ "id": id, "business_name": body["businessName"] })).into_response()
}

async fn update_availability(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.record("availability", &id, body.clone());
    if id == UNKNOWN_SUPPLIER {
        return not_found();
    }
    Json(body).into_response()
}

async fn upload_pdf_summary(
    State(state): State<MockState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut file_name = None;
    let mut size = 0;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            file_name = field.file_name().map(str::to_string);
            size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        }
    }
    state.record(
        "upload",
        &id,
        json!({ "file_name": file_name, "size": size }),
    );

    if size == 0 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": "Empty document" })),
        )
            .into_response();
    }
    Json(json!({
        "supplier_id": id,
        "summary": "Residential plumbing and repairs.",
        "detected_skills": ["pipe fitting", "leak repair"],
        "detected_roles": ["plumber"],
    }))
    .into_response()
}

async fn search_for_supplier(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let requester = body["requester_id"].as_str().unwrap_or_default().to_string();
    state.record("search", &requester, body.clone());

    if body["query"].as_str().unwrap_or_default().contains("unicorn") {
        return Json(json!({
            "results": [],
            "summary": "No direct matches found. Created an open request.",
            "post_id": "post-42",
        }))
        .into_response();
    }
    Json(json!({
        "results": [{
            "supplier_id": "s-7",
            "username": "pat",
            "score": 0.87,
            "rating": 4.0,
            "structured_summary": { "reasoning": "Handles kitchen plumbing" },
        }],
        "report": "Found matches for the query.",
    }))
    .into_response()
}

fn post_json(id: &str, requester_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Fix sink",
        "description": "Kitchen sink leaks",
        "category": "Plumbing",
        "status": status,
        "requester_id": requester_id,
        "offers": 2,
        "views": 11,
        "created_at": "2026-10-18T08:15:00.250000",
    })
}

async fn posts_by_user(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    state.record("posts_by_user", &id, Value::Null);
    Json(json!([
        post_json("p-1", &id, "open"),
        post_json("p-2", &id, "completed"),
    ]))
    .into_response()
}

async fn get_post(State(state): State<MockState>, Path(post_id): Path<String>) -> Response {
    state.record("post", &post_id, Value::Null);
    if post_id == UNKNOWN_POST {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Post not found" })),
        )
            .into_response();
    }
    Json(post_json(&post_id, "r-1", "open")).into_response()
}

async fn get_user(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    state.record("user", &id, Value::Null);
    if id == UNKNOWN_SUPPLIER {
        return not_found();
    }
    Json(json!({
        "id": id,
        "username": "pat",
        "email": "pat@example.com",
        "full_name": "Pat Lee",
        "avatar_url": "",
        "is_supplier": true,
        "created_at": "2026-09-01T12:00:00",
    }))
    .into_response()
}

fn resume_json(user_id: &str) -> Value {
    json!({
        "user_id": user_id,
        "resume_public_id": "res_81",
        "resume_title": "Plumbing CV",
        "resume_pdf_url": "https://files.kontask.app/res_81.pdf",
    })
}

async fn get_resume(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    state.record("get_resume", &id, Value::Null);
    Json(resume_json(&id)).into_response()
}

async fn create_resume(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    state.record("create_resume", &user_id, body.clone());
    Json(body).into_response()
}

async fn update_resume(State(state): State<MockState>, Json(user_id): Json<String>) -> Response {
    state.record("update_resume", &user_id, Value::String(user_id.clone()));
    Json(resume_json(&user_id)).into_response()
}

/// Start the mock on an ephemeral port. Returns its base URL and state.
pub async fn spawn_backend() -> (String, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/suppliers/{id}/profile", put(update_profile))
        .route("/suppliers/{id}/availability", post(update_availability))
        .route("/suppliers/{id}/upload_pdf_summary", post(upload_pdf_summary))
        .route("/search_for_supplier/", post(search_for_supplier))
        .route("/posts/user/{id}", get(posts_by_user))
        .route("/posts/{post_id}", get(get_post))
        .route("/get_user/{id}", get(get_user))
        .route("/get_resume/{id}", get(get_resume))
        .route("/create_resume", post(create_resume))
        .route("/update_resume", post(update_resume))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend crashed");
    });

    (format!("http://{addr}"), state)
}
