//! Shared mock API server for client integration tests.
//!
//! Serves the endpoints the client talks to with canned responses, and
//! records what each request carried (auth header, query pairs, JSON
//! body, multipart parts) so tests can assert on the outgoing wire shape.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use opsdesk_client::{ApiClient, ApiConfig};
use opsdesk_session::SessionManager;
use opsdesk_store::MemoryStore;

/// Password accepted by the mock login endpoint.
pub const TEST_PASSWORD: &str = "correct horse battery staple";
/// Token issued to supervisor logins.
pub const SUPERVISOR_TOKEN: &str = "supervisor-access-token-0001";
/// Token issued to employee logins; write endpoints answer 403 to it.
pub const EMPLOYEE_TOKEN: &str = "employee-access-token-0002";

/// Everything the mock server observed, in arrival order.
#[derive(Default)]
pub struct Recorded {
    /// `Authorization` header per request; `None` when the request was
    /// sent bare.
    pub auth_headers: Vec<Option<String>>,
    /// Query pairs of the most recent list request.
    pub last_query: Option<Vec<(String, String)>>,
    /// JSON bodies of write requests, keyed `"METHOD /path"`.
    pub bodies: Vec<(String, Value)>,
    /// Multipart uploads: (file name, content type, byte count,
    /// description part).
    pub uploads: Vec<(String, String, usize, Option<String>)>,
}

impl Recorded {
    /// The body of the most recent write request matching the key.
    pub fn last_body(&self, key: &str) -> Option<&Value> {
        self.bodies
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, body)| body)
    }

    pub fn request_count(&self) -> usize {
        self.auth_headers.len()
    }
}

type AppState = Arc<Mutex<Recorded>>;

pub struct TestServer {
    pub base_url: String,
    pub recorded: AppState,
}

impl TestServer {
    /// Build a client (with a fresh in-memory session) against this
    /// server.
    pub fn client(&self) -> (ApiClient, Arc<SessionManager>) {
        let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
        let client = ApiClient::new(ApiConfig::new(&self.base_url), session.clone())
            .expect("client should build");
        (client, session)
    }

    /// Log in as the canned supervisor account.
    pub async fn login_supervisor(&self, client: &ApiClient) {
        client
            .auth()
            .login("sup@example.com", TEST_PASSWORD)
            .await
            .expect("supervisor login should succeed");
    }

    /// Log in as the canned employee account.
    pub async fn login_employee(&self, client: &ApiClient) {
        client
            .auth()
            .login("emp@example.com", TEST_PASSWORD)
            .await
            .expect("employee login should succeed");
    }
}

/// Start the mock API server on an ephemeral port.
pub async fn start_server() -> TestServer {
    let recorded: AppState = Arc::new(Mutex::new(Recorded::default()));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/auth/login", post(login))
        .route("/incidents", get(list_incidents).post(create_incident))
        .route(
            "/incidents/{id}",
            get(get_incident).put(update_incident).delete(delete_entity),
        )
        .route("/incidents/{id}/comments", post(add_comment))
        .route("/incidents/{id}/attachments", post(upload_attachment))
        .route("/attachments/{id}/download", get(download_attachment))
        .route("/attachments/{id}", axum::routing::delete(delete_entity))
        .route(
            "/change-requests",
            get(list_change_requests).post(create_change_request),
        )
        .route(
            "/change-requests/{id}",
            get(get_change_request)
                .put(update_change_request)
                .delete(delete_entity),
        )
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_entity),
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for the listener to accept connections.
    let probe = reqwest::Client::new();
    for _ in 0..50 {
        if probe.get(format!("{base_url}/health")).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    TestServer { base_url, recorded }
}

// ---------------------------------------------------------------------------
// Recording helpers
// ---------------------------------------------------------------------------

fn record_auth(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.lock().unwrap().auth_headers.push(auth.clone());
    auth
}

fn record_body(state: &AppState, key: &str, body: &Value) {
    state
        .lock()
        .unwrap()
        .bodies
        .push((key.to_string(), body.clone()));
}

/// Write endpoints reject employee tokens with 403 and bare requests
/// with 401.
fn authorize_write(auth: &Option<String>) -> Result<(), Response> {
    match auth.as_deref() {
        Some(header) if header.ends_with(SUPERVISOR_TOKEN) => Ok(()),
        Some(_) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({"message": "Insufficient permissions"})),
        )
            .into_response()),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Authentication required"})),
        )
            .into_response()),
    }
}

// ---------------------------------------------------------------------------
// Canned entity payloads
// ---------------------------------------------------------------------------

pub fn incident_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "number": format!("INC-{id:0>3}"),
        "title": title,
        "description": "The main email server is not responding to requests",
        "severity": "HIGH",
        "status": status,
        "department": "TECH_TEAM",
        "reporterName": "Jane Doe",
        "createdAt": "2024-01-15T10:30:00Z",
        "updatedAt": "2024-01-15T10:30:00Z"
    })
}

pub fn change_request_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "number": format!("CR-{id:0>3}"),
        "title": "Replace failing mail relay",
        "description": "Swap the primary relay for the standby unit and verify delivery",
        "status": status,
        "incidentId": "9",
        "assignedDepartment": "TECH_TEAM",
        "createdBy": "jane@example.com",
        "createdAt": "2024-01-16T09:00:00Z",
        "updatedAt": "2024-01-16T09:00:00Z"
    })
}

pub fn user_json(id: &str, email: &str, role: &str, active: bool) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": "Test User",
        "primaryDepartment": "TECH_TEAM",
        "additionalDepartments": [],
        "role": role,
        "active": active,
        "createdAt": "2024-01-01T08:00:00Z",
        "updatedAt": "2024-01-10T08:00:00Z"
    })
}

fn page_json(content: Vec<Value>, total_elements: u64, query: &[(String, String)]) -> Value {
    let lookup = |key: &str, default: u64| {
        query
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(default)
    };
    let size = lookup("size", 10).max(1);
    json!({
        "content": content,
        "totalElements": total_elements,
        "totalPages": total_elements.div_ceil(size),
        "number": lookup("page", 0),
        "size": size,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    record_body(&state, "POST /auth/login", &body);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if password != TEST_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
            .into_response();
    }
    if email == "disabled@example.com" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "Account disabled"})),
        )
            .into_response();
    }

    let (token, role) = if email.starts_with("emp") {
        (EMPLOYEE_TOKEN, "EMPLOYEE")
    } else if email.starts_with("admin") {
        (SUPERVISOR_TOKEN, "ADMIN")
    } else {
        (SUPERVISOR_TOKEN, "SUPERVISOR")
    };

    Json(json!({
        "accessToken": token,
        "tokenType": "Bearer",
        "expiresIn": 3_600_000i64,
        "user": {
            "id": "7",
            "email": email,
            "name": "Test User",
            "role": role,
            "primaryDepartment": "TECH_TEAM",
            "additionalDepartments": [],
            "active": true
        }
    }))
    .into_response()
}

async fn list_incidents(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    record_auth(&state, &headers);
    state.lock().unwrap().last_query = Some(query.clone());
    let content = vec![
        incident_json("1", "Email server down", "INVESTIGATING"),
        incident_json("2", "Printer not working", "RESOLVED"),
    ];
    Json(page_json(content, 27, &query)).into_response()
}

async fn get_incident(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    record_auth(&state, &headers);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Incident not found"})))
            .into_response();
    }
    let mut incident = incident_json(&id, "Email server down", "INVESTIGATING");
    incident["comments"] = json!([{
        "id": "51",
        "content": "Investigating the mail relay",
        "userName": "Tech Support",
        "createdAt": "2024-01-15T11:00:00Z"
    }]);
    Json(incident).into_response()
}

async fn create_incident(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, "POST /incidents", &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let mut incident = incident_json("100", body["title"].as_str().unwrap_or(""), "INVESTIGATING");
    incident["description"] = body["description"].clone();
    incident["severity"] = body["severity"].clone();
    incident["department"] = body["department"].clone();
    (StatusCode::CREATED, Json(incident)).into_response()
}

async fn update_incident(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, &format!("PUT /incidents/{id}"), &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    if id == "rejected" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Status transition not allowed"})),
        )
            .into_response();
    }
    let status = body["status"].as_str().unwrap_or("INVESTIGATING");
    Json(incident_json(&id, "Email server down", status)).into_response()
}

async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, &format!("POST /incidents/{id}/comments"), &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let mut incident = incident_json(&id, "Email server down", "INVESTIGATING");
    incident["comments"] = json!([{
        "id": "52",
        "content": body["content"],
        "userName": "Test User",
        "createdAt": "2024-01-15T12:00:00Z"
    }]);
    Json(incident).into_response()
}

async fn upload_attachment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let auth = record_auth(&state, &headers);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }

    let mut file_name = String::new();
    let mut content_type = String::new();
    let mut byte_count = 0;
    let mut description = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                content_type = field.content_type().unwrap_or_default().to_string();
                byte_count = field.bytes().await.unwrap().len();
            }
            Some("description") => description = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    state.lock().unwrap().uploads.push((
        file_name.clone(),
        content_type.clone(),
        byte_count,
        description.clone(),
    ));

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "900",
            "incidentId": id,
            "fileName": format!("stored-{file_name}"),
            "originalFileName": file_name,
            "fileSize": byte_count,
            "contentType": content_type,
            "fileUrl": "/files/900",
            "uploadedAt": "2024-01-15T12:30:00Z",
            "uploadedBy": "sup@example.com",
            "description": description
        })),
    )
        .into_response()
}

async fn download_attachment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    record_auth(&state, &headers);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Attachment not found"})))
            .into_response();
    }
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "application/octet-stream")],
        vec![0x25u8, 0x50, 0x44, 0x46],
    )
        .into_response()
}

async fn list_change_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    record_auth(&state, &headers);
    state.lock().unwrap().last_query = Some(query.clone());
    let content = vec![
        change_request_json("17", "PENDING"),
        change_request_json("18", "APPROVED"),
    ];
    Json(page_json(content, 2, &query)).into_response()
}

async fn get_change_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    record_auth(&state, &headers);
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Change request not found"})),
        )
            .into_response();
    }
    Json(change_request_json(&id, "PENDING")).into_response()
}

async fn create_change_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, "POST /change-requests", &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let mut cr = change_request_json("200", "PENDING");
    cr["title"] = body["title"].clone();
    cr["incidentId"] = body["incidentId"].clone();
    (StatusCode::CREATED, Json(cr)).into_response()
}

async fn update_change_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, &format!("PUT /change-requests/{id}"), &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let status = body["status"].as_str().unwrap_or("PENDING");
    let mut cr = change_request_json(&id, status);
    if status == "APPROVED" {
        cr["approvedBy"] = json!("sup@example.com");
        cr["approvedAt"] = json!("2024-01-16T14:00:00Z");
    }
    if let Some(notes) = body.get("notes") {
        cr["notes"] = notes.clone();
    }
    Json(cr).into_response()
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    record_auth(&state, &headers);
    state.lock().unwrap().last_query = Some(query.clone());
    let content = vec![
        user_json("1", "admin@example.com", "ADMIN", true),
        user_json("2", "sup@example.com", "SUPERVISOR", true),
        user_json("3", "emp@example.com", "EMPLOYEE", false),
    ];
    Json(page_json(content, 3, &query)).into_response()
}

async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    record_auth(&state, &headers);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "User not found"}))).into_response();
    }
    Json(user_json(&id, "sup@example.com", "SUPERVISOR", true)).into_response()
}

async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, "POST /users", &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let mut user = user_json("300", body["email"].as_str().unwrap_or(""), "EMPLOYEE", true);
    user["name"] = body["name"].clone();
    user["role"] = body["role"].clone();
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let auth = record_auth(&state, &headers);
    record_body(&state, &format!("PUT /users/{id}"), &body);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    let active = body["active"].as_bool().unwrap_or(true);
    Json(user_json(&id, "sup@example.com", "SUPERVISOR", active)).into_response()
}

async fn delete_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let auth = record_auth(&state, &headers);
    if let Err(denied) = authorize_write(&auth) {
        return denied;
    }
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
