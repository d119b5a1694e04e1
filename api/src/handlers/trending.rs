use axum::{extract::State, Json};
use serde_json::Value;

use super::InternalError;
use crate::state::AppState;
use common::telemetry;

/// Return the current contents of the shared trending data file.
///
/// The file is read and parsed on every request. Any failure becomes a
/// bare 500 and the cause only goes to the log.
#[tracing::instrument(skip(state))]
pub async fn get_trending(State(state): State<AppState>) -> Result<Json<Value>, InternalError> {
    match state.data_file.load().await {
        Ok(data) => {
            telemetry::record_trending_read("success");
            Ok(Json(data))
        }
        Err(e) => {
            telemetry::record_trending_read(e.kind());
            let failure = InternalError::new();
            tracing::error!(
                error = %e,
                kind = e.kind(),
                trace_id = %failure.trace_id,
                "Failed to load trending data"
            );
            Err(failure)
        }
    }
}
