//! Shared application state for axum handlers.

use std::sync::Arc;

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::services::fleet_service::FleetService;
use iotfleet_app::services::plugin_action_service::PluginActionService;
use iotfleet_app::services::status_reconciler::StatusReconciler;

/// Application state shared across all axum handlers.
///
/// Generic over the three gateway types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the gateways themselves do not need
/// to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<FG, BG, PG> {
    /// Fleet CRUD and overview.
    pub fleet_service: Arc<FleetService<FG>>,
    /// Plugin status table.
    pub status_reconciler: Arc<StatusReconciler<FG, BG>>,
    /// Start / stop / remove / re-inject.
    pub plugin_actions: Arc<PluginActionService<PG>>,
}

impl<FG, BG, PG> Clone for AppState<FG, BG, PG> {
    fn clone(&self) -> Self {
        Self {
            fleet_service: Arc::clone(&self.fleet_service),
            status_reconciler: Arc::clone(&self.status_reconciler),
            plugin_actions: Arc::clone(&self.plugin_actions),
        }
    }
}

impl<FG, BG, PG> AppState<FG, BG, PG>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        fleet_service: FleetService<FG>,
        status_reconciler: StatusReconciler<FG, BG>,
        plugin_actions: PluginActionService<PG>,
    ) -> Self {
        Self {
            fleet_service: Arc::new(fleet_service),
            status_reconciler: Arc::new(status_reconciler),
            plugin_actions: Arc::new(plugin_actions),
        }
    }
}
