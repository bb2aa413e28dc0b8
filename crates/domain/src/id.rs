//! Typed identifier newtypes.
//!
//! The management API hands out identifiers as UUID strings, but older
//! records and some endpoints use plain integers. Identifiers are therefore
//! kept as their string form and always compared by string equality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random identifier (UUID v4).
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Borrow the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Build an identifier from a JSON scalar (string or number).
            ///
            /// Returns `None` for empty strings and non-scalar values.
            #[must_use]
            pub fn from_json(value: &serde_json::Value) -> Option<Self> {
                crate::record::scalar_to_string(value).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Fleet`](crate::fleet::Fleet).
    FleetId
);

define_id!(
    /// Unique identifier for a [`Board`](crate::board::Board).
    BoardId
);

define_id!(
    /// Unique identifier for a plugin referenced by an
    /// [`Injection`](crate::injection::Injection).
    PluginId
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = FleetId::generate();
        let b = FleetId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = BoardId::generate();
        let parsed: BoardId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_reject_blank_identifier() {
        assert_eq!(PluginId::from_str("   "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn should_compare_numeric_and_string_forms_equal() {
        let from_number = PluginId::from_json(&json!(42)).unwrap();
        let from_string = PluginId::from_json(&json!("42")).unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id: FleetId = "f-1".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"f-1\"");
    }
}
