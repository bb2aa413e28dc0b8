//! Iotronic adapter error types.

use iotfleet_domain::error::{IotFleetError, NotFoundError};

/// Errors specific to the Iotronic adapter.
#[derive(Debug, thiserror::Error)]
pub enum IotronicError {
    /// The configured base URL cannot be parsed or has no path.
    #[error("invalid API base URL `{0}`")]
    BaseUrl(String),

    /// The HTTP client could not be built.
    #[error("unable to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request never got a response (connection, TLS, timeout).
    #[error("{method} {path} failed")]
    Transport {
        method: reqwest::Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{method} {path} returned {status}: {message}")]
    Status {
        method: reqwest::Method,
        path: String,
        status: u16,
        message: String,
    },

    /// The addressed record does not exist.
    #[error("{entity} `{id}` not found")]
    NotFound { entity: &'static str, id: String },

    /// The response body is not the JSON shape we expect.
    #[error("unexpected response body for {path}: {reason}")]
    Body { path: String, reason: String },
}

impl IotronicError {
    /// Convert into an [`IotFleetError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> IotFleetError {
        match self {
            Self::NotFound { entity, id } => NotFoundError { entity, id }.into(),
            other => IotFleetError::Upstream(Box::new(other)),
        }
    }
}

impl From<IotronicError> for IotFleetError {
    fn from(err: IotronicError) -> Self {
        err.into_domain()
    }
}

/// Best human-readable message from an error response body.
///
/// The API wraps failures as `{"error_message": ..}`, sometimes with a
/// JSON-encoded string inside carrying a `faultstring`.
pub(crate) fn remote_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let message = value.get("error_message").unwrap_or(&value);
    if let Some(inner) = message.as_str() {
        return serde_json::from_str::<serde_json::Value>(inner)
            .ok()
            .and_then(|v| v.get("faultstring").and_then(|f| f.as_str()).map(str::to_string))
            .unwrap_or_else(|| inner.to_string());
    }
    message
        .get("faultstring")
        .and_then(|f| f.as_str())
        .map_or_else(|| message.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_not_found_to_domain_not_found() {
        let err: IotFleetError = IotronicError::NotFound {
            entity: "Board",
            id: "b1".to_string(),
        }
        .into();
        assert!(matches!(err, IotFleetError::NotFound(_)));
        assert_eq!(err.describe(), "not found: Board `b1` not found");
    }

    #[test]
    fn should_convert_status_error_to_upstream() {
        let err: IotFleetError = IotronicError::Status {
            method: reqwest::Method::GET,
            path: "/v1/fleets".to_string(),
            status: 503,
            message: "maintenance".to_string(),
        }
        .into();
        assert!(matches!(err, IotFleetError::Upstream(_)));
        assert_eq!(
            err.describe(),
            "upstream error: GET /v1/fleets returned 503: maintenance"
        );
    }

    #[test]
    fn should_extract_nested_faultstring() {
        let body = r#"{"error_message": "{\"faultstring\": \"Board b1 is not online\", \"debuginfo\": null}"}"#;
        assert_eq!(remote_message(body), "Board b1 is not online");
    }

    #[test]
    fn should_extract_plain_error_message() {
        assert_eq!(remote_message(r#"{"error_message": "denied"}"#), "denied");
    }

    #[test]
    fn should_fall_back_to_raw_body() {
        assert_eq!(remote_message("  Bad Gateway \n"), "Bad Gateway");
    }
}
