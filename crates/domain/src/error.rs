//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`IotFleetError`] via `#[from]` or an explicit `From` impl.

/// Top-level error shared by the application core and its ports.
#[derive(Debug, thiserror::Error)]
pub enum IotFleetError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("timed out")]
    Timeout(#[from] TimeoutError),

    /// The remote management API failed or answered something unusable.
    #[error("upstream error")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IotFleetError {
    /// Render the error and its source chain as one line, for flash
    /// messages and log fields.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            text.push_str(": ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        text
    }
}

/// Invariant violations detected before any IO happens.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("identifier must not be empty")]
    EmptyId,

    #[error("unknown plugin action `{0}`")]
    UnknownAction(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A remote call did not complete within its deadline.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{operation} did not complete within {after_ms}ms")]
pub struct TimeoutError {
    pub operation: &'static str,
    pub after_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[test]
    fn should_convert_validation_error_with_from() {
        let err: IotFleetError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            IotFleetError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_display_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Fleet",
            id: "f-1".to_string(),
        };
        assert_eq!(err.to_string(), "Fleet `f-1` not found");
    }

    #[test]
    fn should_describe_full_source_chain() {
        let err = IotFleetError::Upstream(Box::new(Refused));
        assert_eq!(err.describe(), "upstream error: connection refused");
    }

    #[test]
    fn should_describe_timeout_with_operation() {
        let err: IotFleetError = TimeoutError {
            operation: "list_boards",
            after_ms: 250,
        }
        .into();
        assert_eq!(
            err.describe(),
            "timed out: list_boards did not complete within 250ms"
        );
    }
}
