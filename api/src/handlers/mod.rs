pub mod trending;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Generic server failure.
///
/// The response is a bare 500 with no detail about the cause. The trace id
/// only appears in the server log so a report can be matched to its cause.
#[derive(Debug)]
pub struct InternalError {
    pub trace_id: String,
}

impl InternalError {
    pub fn new() -> Self {
        Self {
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl Default for InternalError {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
