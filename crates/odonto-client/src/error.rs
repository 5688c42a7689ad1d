use thiserror::Error;

/// How much of a failing response body is carried in the error message.
const BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("non-JSON response: {body}")]
    NotJson { body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            body: truncate_body(body),
        }
    }

    pub fn not_json(body: &str) -> Self {
        ApiError::NotJson {
            body: truncate_body(body),
        }
    }

    /// HTTP status code of a `Status` error, if that is what this is.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// First 200 characters of a response body, on a char boundary.
pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((i, _)) => body[..i].to_string(),
        None => body.to_string(),
    }
}
