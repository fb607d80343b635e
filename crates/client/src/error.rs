//! API error taxonomy.
//!
//! Every failed request maps onto one of these variants. None of them
//! triggers a retry or a session teardown; a failure is terminal for the
//! user action that caused it, and a 403 in particular leaves the stored
//! session untouched.

/// Errors from the opsdesk REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Cannot reach server: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401 -- the credentials were rejected.
    #[error("Invalid credentials")]
    Unauthorized,

    /// 403 -- the session is fine but lacks permission for this action.
    #[error("Insufficient permission")]
    Forbidden,

    /// 404 -- the requested resource does not exist.
    #[error("Resource not found")]
    NotFound,

    /// 400/422 -- the request payload failed validation, either locally
    /// before sending or on the server. Carries the field-level message
    /// when the server provided one.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Persisting or reading the local session failed.
    #[error("Session storage failed: {0}")]
    Session(#[from] opsdesk_session::SessionError),

    /// Any other non-2xx response, with the status and raw body for
    /// debugging.
    #[error("Unexpected server response ({status}): {body}")]
    Unexpected { status: u16, body: String },
}

impl ApiError {
    /// Classify a non-2xx status code and response body into a variant.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400 | 422 => Self::Validation(validation_message(&body)),
            _ => Self::Unexpected { status, body },
        }
    }
}

/// Local payload validation failures map onto the same variant as server
/// 400/422 rejections, with field messages joined in field order.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_deref()
                        .unwrap_or("Invalid value");
                    format!("{field}: {message}")
                })
            })
            .collect();
        fields.sort();
        Self::Validation(fields.join("; "))
    }
}

/// Extract a human-readable message from a validation failure body.
///
/// Tries the common server shapes in order: `{"message": ...}`, a
/// `{"errors": {field: message}}` map, then `{"error": ...}`. Falls back
/// to a generic message when the body is not JSON or has none of these.
fn validation_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        if let Some(errors) = value.get("errors").and_then(|e| e.as_object()) {
            let fields: Vec<String> = errors
                .iter()
                .map(|(field, message)| {
                    format!("{field}: {}", message.as_str().unwrap_or("invalid"))
                })
                .collect();
            if !fields.is_empty() {
                return fields.join("; ");
            }
        }
        if let Some(error) = value.get("error").and_then(|m| m.as_str()) {
            return error.to_string();
        }
    }
    "Request validation failed".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
