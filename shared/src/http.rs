//! HTTP response helpers.

use lambda_http::{Body, Response};
use serde::Serialize;

use crate::{Error, Result};

/// Error envelope: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Success envelope for mutations that do not echo a record.
#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Confirmation {
    pub fn new(result: &'static str) -> Self {
        Self { result, id: None }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Create a pretty-printed JSON response with the given status code and data.
pub fn json_response<T: Serialize + ?Sized>(status: u16, data: &T) -> Result<Response<Body>> {
    let body = serde_json::to_string_pretty(data)?;
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(body))?)
}

/// Render `error` with its status code and client-safe message.
pub fn error_response(error: &Error) -> Result<Response<Body>> {
    json_response(
        error.status_code(),
        &ErrorBody {
            error: error.public_message(),
        },
    )
}
