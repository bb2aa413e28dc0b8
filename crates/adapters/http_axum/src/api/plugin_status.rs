//! JSON handler for the plugin status table.

use axum::Json;
use axum::extract::{Path, State};

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::request_cache::RequestCache;
use iotfleet_domain::id::{FleetId, PluginId};
use iotfleet_domain::status::StatusRow;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/fleets/{fleet}/plugins/{plugin}/status`
///
/// Unlike the dashboard page, a failed listing is an error response here
/// rather than an empty table.
pub async fn get<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path((fleet, plugin)): Path<(String, String)>,
) -> Result<Json<Vec<StatusRow>>, ApiError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let fleet: FleetId = fleet.parse()?;
    let plugin: PluginId = plugin.parse()?;
    let mut cache = RequestCache::new();
    let rows = state
        .status_reconciler
        .reconcile(&mut cache, &fleet, &plugin)
        .await?;
    Ok(Json(rows))
}
