//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use iotfleet_domain::error::{IotFleetError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code for an [`IotFleetError`].
///
/// Anything that went wrong on the remote side is a bad gateway.
pub(crate) fn status_of(err: &IotFleetError) -> StatusCode {
    match err {
        IotFleetError::Validation(_) => StatusCode::BAD_REQUEST,
        IotFleetError::NotFound(_) => StatusCode::NOT_FOUND,
        IotFleetError::Upstream(_) | IotFleetError::Timeout(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Maps [`IotFleetError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(IotFleetError);

impl From<IotFleetError> for ApiError {
    fn from(err: IotFleetError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let message = self.0.describe();
        if status.is_server_error() {
            tracing::error!(error = %message, "management API error");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
