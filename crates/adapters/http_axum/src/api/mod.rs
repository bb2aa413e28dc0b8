//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod fleets;
#[allow(clippy::missing_errors_doc)]
pub mod plugin_status;

use axum::Router;
use axum::routing::get;

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<FG, BG, PG>() -> Router<AppState<FG, BG, PG>>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/fleets", get(fleets::list::<FG, BG, PG>))
        .route("/fleets/{id}", get(fleets::get::<FG, BG, PG>))
        .route(
            "/fleets/{fleet}/plugins/{plugin}/status",
            get(plugin_status::get::<FG, BG, PG>),
        )
}
