//! Fleet — a named group of boards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::Board;
use crate::error::{IotFleetError, ValidationError};
use crate::id::FleetId;
use crate::injection::Injection;
use crate::record;
use crate::time::Timestamp;

/// A named group of IoT boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Fleet {
    /// Create a builder for constructing a [`Fleet`].
    #[must_use]
    pub fn builder() -> FleetBuilder {
        FleetBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), IotFleetError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Build a fleet from a remote record.
    ///
    /// Returns `None` without an identifier. A missing name falls back to
    /// the identifier so the fleet stays listable.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let id: FleetId = record::first_scalar(record, &["uuid", "id"])?.parse().ok()?;
        let name = record::first_scalar(record, &["name"]).unwrap_or_else(|| id.to_string());
        Some(Self {
            id,
            name,
            description: record::first_scalar(record, &["description"]),
            created_at: record::timestamp(record, &["created_at"]),
            updated_at: record::timestamp(record, &["updated_at"]),
        })
    }

    /// Naive case-insensitive substring match on the fleet name.
    #[must_use]
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&filter.trim().to_lowercase())
    }
}

/// Step-by-step builder for [`Fleet`].
#[derive(Debug, Default)]
pub struct FleetBuilder {
    id: Option<FleetId>,
    name: Option<String>,
    description: Option<String>,
}

impl FleetBuilder {
    #[must_use]
    pub fn id(mut self, id: FleetId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description; blank strings are stored as `None`.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    /// Consume the builder, validate, and return a [`Fleet`].
    ///
    /// # Errors
    ///
    /// Returns [`IotFleetError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Fleet, IotFleetError> {
        let fleet = Fleet {
            id: self.id.unwrap_or_else(FleetId::generate),
            name: self.name.unwrap_or_default().trim().to_string(),
            description: self.description,
            created_at: None,
            updated_at: None,
        };
        fleet.validate()?;
        Ok(fleet)
    }
}

/// A fleet together with its boards and fleet-level injections, as shown
/// on the overview page.
#[derive(Debug, Clone, Serialize)]
pub struct FleetDetail {
    pub fleet: Fleet,
    pub boards: Vec<Board>,
    pub plugins: Vec<Injection>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_build_valid_fleet_when_name_provided() {
        let fleet = Fleet::builder().name("Greenhouse").build().unwrap();
        assert_eq!(fleet.name, "Greenhouse");
        assert!(fleet.description.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_blank() {
        let result = Fleet::builder().name("   ").build();
        assert!(matches!(
            result,
            Err(IotFleetError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_drop_blank_description() {
        let fleet = Fleet::builder().name("a").description(" ").build().unwrap();
        assert!(fleet.description.is_none());
    }

    #[test]
    fn should_match_filter_case_insensitively() {
        let fleet = Fleet::builder().name("North Greenhouse").build().unwrap();
        assert!(fleet.matches_filter("green"));
        assert!(fleet.matches_filter("NORTH"));
        assert!(fleet.matches_filter(""));
        assert!(!fleet.matches_filter("south"));
    }

    #[test]
    fn should_parse_remote_record() {
        let fleet = Fleet::from_record(&json!({
            "uuid": "f-1",
            "name": "lab",
            "description": "bench boards",
            "created_at": "2024-03-01T10:00:00+00:00",
        }))
        .unwrap();

        assert_eq!(fleet.id.as_str(), "f-1");
        assert_eq!(fleet.description.as_deref(), Some("bench boards"));
        assert!(fleet.created_at.is_some());
        assert!(fleet.updated_at.is_none());
    }

    #[test]
    fn should_use_id_as_name_when_record_is_unnamed() {
        let fleet = Fleet::from_record(&json!({"id": 4})).unwrap();
        assert_eq!(fleet.name, "4");
    }
}
