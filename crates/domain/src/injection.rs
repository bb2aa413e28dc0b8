//! Injection — a plugin deployed at board or fleet scope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::PluginId;
use crate::record;

/// Keys probed on a nested `plugin` object, in order.
const NESTED_PLUGIN_KEYS: &[&str] = &["uuid", "id", "plugin_uuid", "plugin_id"];

/// Keys probed on the injection record itself, in order.
const FLAT_PLUGIN_KEYS: &[&str] = &["plugin_uuid", "plugin_id", "uuid", "id", "plugin"];

/// Canonical injection record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injection {
    pub plugin_id: PluginId,
    pub plugin_name: Option<String>,
    pub status: Option<String>,
    pub onboot: Option<bool>,
}

impl Injection {
    #[must_use]
    pub fn new(plugin_id: PluginId) -> Self {
        Self {
            plugin_id,
            plugin_name: None,
            status: None,
            onboot: None,
        }
    }

    /// Build an injection from a remote record, accepting both the nested
    /// (`{"plugin": {"uuid": ..}}`) and the flat (`{"plugin_uuid": ..}`)
    /// shapes.
    ///
    /// Returns `None` when no plugin identifier can be extracted.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let plugin_id = plugin_id_from_record(record)?;
        let nested = record.get("plugin").filter(|p| p.is_object());

        let plugin_name = nested
            .and_then(|p| record::first_scalar(p, &["name"]))
            .or_else(|| record::first_scalar(record, &["plugin_name", "name"]));

        Some(Self {
            plugin_id,
            plugin_name,
            status: record::first_scalar(record, &["status", "state"]),
            onboot: record::strict_bool(record, "onboot"),
        })
    }

    /// Whether this injection deploys `plugin`.
    #[must_use]
    pub fn is_for(&self, plugin: &PluginId) -> bool {
        self.plugin_id == *plugin
    }

    /// Name to show in tables: the plugin name, or its id when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.plugin_name
            .as_deref()
            .unwrap_or(self.plugin_id.as_str())
    }
}

/// Extract the plugin identifier an injection record refers to.
///
/// A nested `plugin` object is probed first (`uuid`, `id`, `plugin_uuid`,
/// `plugin_id`), then the record's own `plugin_uuid`, `plugin_id`, `uuid`,
/// `id` and a scalar `plugin` field. The first non-empty scalar wins and is
/// returned in string form.
#[must_use]
pub fn plugin_id_from_record(record: &Value) -> Option<PluginId> {
    let nested = record
        .get("plugin")
        .filter(|p| p.is_object())
        .and_then(|p| record::first_scalar(p, NESTED_PLUGIN_KEYS));

    nested
        .or_else(|| record::first_scalar(record, FLAT_PLUGIN_KEYS))
        .and_then(|id| id.parse().ok())
}

/// Whether any of `injections` deploys `plugin`.
#[must_use]
pub fn contains_plugin(injections: &[Injection], plugin: &PluginId) -> bool {
    injections.iter().any(|inj| inj.is_for(plugin))
}
