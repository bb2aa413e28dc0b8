//! Dashboard page for the status of one plugin on every board of a fleet.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use iotfleet_app::flash::Flash;
use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::request_cache::RequestCache;
use iotfleet_domain::action::PluginAction;
use iotfleet_domain::id::{BoardId, FleetId, PluginId};
use iotfleet_domain::status::StatusRow;

use super::DashboardError;
use super::flash::{FlashQuery, path, redirect_with_flash};
use crate::state::AppState;

/// A row action rendered as a one-button form.
pub struct ActionButton {
    label: &'static str,
    slug: &'static str,
    path: String,
}

/// A status row with its action buttons.
pub struct StatusLine {
    row: StatusRow,
    note: String,
    actions: Vec<ActionButton>,
}

impl StatusLine {
    fn new(fleet: &FleetId, plugin: &PluginId, row: StatusRow) -> Self {
        let actions = PluginAction::ALL
            .into_iter()
            .map(|action| ActionButton {
                label: action.label(),
                slug: action.slug(),
                path: action_path(fleet, plugin, &row.board_id, action),
            })
            .collect();
        let note = if row.message.is_empty() {
            "-".to_string()
        } else {
            row.message.clone()
        };
        Self { row, note, actions }
    }
}

/// Plugin status page template.
#[derive(Template)]
#[template(path = "plugin_status.html")]
pub struct PluginStatusTemplate {
    flash: Option<Flash>,
    fleet_id: String,
    fleet_name: String,
    fleet_path: String,
    plugin_id: String,
    error: Option<String>,
    lines: Vec<StatusLine>,
}

impl IntoResponse for PluginStatusTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

fn status_path(fleet: &FleetId, plugin: &PluginId) -> String {
    path(&["fleets", fleet.as_str(), "plugins", plugin.as_str(), "status"])
}

fn action_path(fleet: &FleetId, plugin: &PluginId, board: &BoardId, action: PluginAction) -> String {
    path(&[
        "fleets",
        fleet.as_str(),
        "plugins",
        plugin.as_str(),
        "boards",
        board.as_str(),
        action.slug(),
    ])
}

/// `GET /fleets/{fleet}/plugins/{plugin}/status` — one row per board.
///
/// A failed listing still renders the page: an empty table with the
/// error shown above it.
pub async fn table<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path((fleet, plugin)): Path<(String, String)>,
    Query(flash): Query<FlashQuery>,
) -> Result<PluginStatusTemplate, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let fleet: FleetId = fleet.parse()?;
    let plugin: PluginId = plugin.parse()?;
    let mut cache = RequestCache::new();

    let report = state
        .status_reconciler
        .plugin_status(&mut cache, &fleet, &plugin)
        .await;

    let fleet_name = match state.fleet_service.get_fleet(&mut cache, &fleet).await {
        Ok(record) => record.name,
        Err(err) => {
            tracing::debug!(fleet = %fleet, error = %err.describe(), "fleet name unavailable");
            fleet.to_string()
        }
    };

    Ok(PluginStatusTemplate {
        flash: flash.into_flash(),
        fleet_path: path(&["fleets", fleet.as_str()]),
        fleet_id: fleet.to_string(),
        fleet_name,
        plugin_id: plugin.to_string(),
        error: report.error,
        lines: report
            .rows
            .into_iter()
            .map(|row| StatusLine::new(&fleet, &plugin, row))
            .collect(),
    })
}

/// `POST /fleets/{fleet}/plugins/{plugin}/boards/{board}/{action}`
///
/// Runs the action and always redirects back to the status page with the
/// outcome as a flash message.
pub async fn run_action<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path((fleet, plugin, board, action)): Path<(String, String, String, String)>,
) -> Result<Redirect, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let fleet: FleetId = fleet.parse()?;
    let plugin: PluginId = plugin.parse()?;
    let board: BoardId = board.parse()?;
    let action: PluginAction = action.parse()?;

    let flash = state.plugin_actions.run(&board, &plugin, action).await;

    Ok(redirect_with_flash(&status_path(&fleet, &plugin), &flash))
}
