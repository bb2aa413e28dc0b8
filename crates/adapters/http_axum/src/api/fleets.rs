//! JSON handlers for fleets.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::request_cache::RequestCache;
use iotfleet_domain::fleet::{Fleet, FleetDetail};
use iotfleet_domain::id::FleetId;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the fleet name.
    pub q: Option<String>,
}

/// `GET /api/fleets`
pub async fn list<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Fleet>>, ApiError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let fleets = state.fleet_service.list_fleets(query.q.as_deref()).await?;
    Ok(Json(fleets))
}

/// `GET /api/fleets/{id}` — the fleet with its boards and plugins.
pub async fn get<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path(id): Path<String>,
) -> Result<Json<FleetDetail>, ApiError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let id: FleetId = id.parse()?;
    let mut cache = RequestCache::new();
    let detail = state.fleet_service.fleet_detail(&mut cache, &id).await?;
    Ok(Json(detail))
}
