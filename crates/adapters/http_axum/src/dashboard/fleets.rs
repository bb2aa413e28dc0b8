//! Dashboard pages for fleets: list, create, edit, delete and overview.

use askama::Template;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use iotfleet_app::flash::Flash;
use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_app::request_cache::RequestCache;
use iotfleet_domain::board::Board;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::fleet::Fleet;
use iotfleet_domain::id::FleetId;
use iotfleet_domain::injection::Injection;
use iotfleet_domain::time;

use super::DashboardError;
use super::flash::{FlashQuery, path, redirect_with_flash};
use crate::state::AppState;

const EMPTY: &str = "-";

/// One line of the fleet table.
pub struct FleetRow {
    name: String,
    description: String,
    created: String,
    detail_path: String,
    edit_path: String,
    delete_path: String,
}

impl From<Fleet> for FleetRow {
    fn from(fleet: Fleet) -> Self {
        let id = fleet.id.as_str();
        Self {
            detail_path: path(&["fleets", id]),
            edit_path: path(&["fleets", id, "edit"]),
            delete_path: path(&["fleets", id, "delete"]),
            created: fleet
                .created_at
                .as_ref()
                .map_or_else(|| EMPTY.to_string(), time::display),
            description: fleet.description.unwrap_or_else(|| EMPTY.to_string()),
            name: fleet.name,
        }
    }
}

/// Fleet list page template.
#[derive(Template)]
#[template(path = "fleet_list.html")]
pub struct FleetListTemplate {
    flash: Option<Flash>,
    filter: String,
    fleets: Vec<FleetRow>,
}

impl IntoResponse for FleetListTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Create / edit form template.
#[derive(Template)]
#[template(path = "fleet_form.html")]
pub struct FleetFormTemplate {
    flash: Option<Flash>,
    heading: &'static str,
    submit_label: &'static str,
    action: String,
    name: String,
    description: String,
    error: Option<String>,
}

impl IntoResponse for FleetFormTemplate {
    fn into_response(self) -> Response {
        let status = if self.error.is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::OK
        };
        (status, Html(self.to_string())).into_response()
    }
}

impl FleetFormTemplate {
    fn create(name: String, description: String, error: Option<String>) -> Self {
        Self {
            flash: None,
            heading: "Create Fleet",
            submit_label: "Create Fleet",
            action: path(&["fleets"]),
            name,
            description,
            error,
        }
    }

    fn edit(id: &FleetId, name: String, description: String, error: Option<String>) -> Self {
        Self {
            flash: None,
            heading: "Update Fleet",
            submit_label: "Update Fleet",
            action: path(&["fleets", id.as_str(), "edit"]),
            name,
            description,
            error,
        }
    }
}

/// A board line of the overview page.
pub struct BoardRow {
    id: String,
    name: String,
    state: String,
    kind: String,
    agent: String,
}

impl From<Board> for BoardRow {
    fn from(board: Board) -> Self {
        Self {
            state: board.state().to_string(),
            name: board.display_name().to_string(),
            id: board.id.to_string(),
            kind: board.kind.unwrap_or_else(|| EMPTY.to_string()),
            agent: board.agent.unwrap_or_else(|| EMPTY.to_string()),
        }
    }
}

/// A fleet-level plugin line of the overview page.
pub struct PluginRow {
    id: String,
    name: String,
    status: String,
    onboot: &'static str,
    status_path: String,
}

impl PluginRow {
    fn new(fleet: &FleetId, injection: Injection) -> Self {
        Self {
            status_path: path(&[
                "fleets",
                fleet.as_str(),
                "plugins",
                injection.plugin_id.as_str(),
                "status",
            ]),
            name: injection.display_name().to_string(),
            id: injection.plugin_id.to_string(),
            status: injection.status.unwrap_or_else(|| EMPTY.to_string()),
            onboot: match injection.onboot {
                Some(true) => "yes",
                Some(false) => "no",
                None => EMPTY,
            },
        }
    }
}

/// Fleet overview page template.
#[derive(Template)]
#[template(path = "fleet_detail.html")]
pub struct FleetDetailTemplate {
    flash: Option<Flash>,
    id: String,
    name: String,
    description: String,
    created: String,
    updated: String,
    edit_path: String,
    boards: Vec<BoardRow>,
    plugins: Vec<PluginRow>,
}

impl IntoResponse for FleetDetailTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Query string of the list page.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// Form data for create and update.
#[derive(Debug, Deserialize)]
pub struct FleetForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `GET /fleets` — fleet table with an optional name filter.
pub async fn list<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Query(query): Query<ListQuery>,
    Query(flash): Query<FlashQuery>,
) -> Result<FleetListTemplate, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let filter = query.q.unwrap_or_default();
    let fleets = state.fleet_service.list_fleets(Some(filter.as_str())).await?;

    Ok(FleetListTemplate {
        flash: flash.into_flash(),
        filter,
        fleets: fleets.into_iter().map(FleetRow::from).collect(),
    })
}

/// `GET /fleets/new` — empty create form.
pub async fn new_form() -> FleetFormTemplate {
    FleetFormTemplate::create(String::new(), String::new(), None)
}

/// `POST /fleets` — create a fleet (PRG).
///
/// A blank name re-renders the form; a remote failure redirects to the
/// list with an error flash.
pub async fn create<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Form(form): Form<FleetForm>,
) -> Response
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    match state
        .fleet_service
        .create_fleet(&form.name, &form.description)
        .await
    {
        Ok(fleet) => redirect_with_flash(
            &path(&["fleets"]),
            &Flash::success(format!("Fleet {} created.", fleet.name)),
        )
        .into_response(),
        Err(IotFleetError::Validation(err)) => {
            FleetFormTemplate::create(form.name, form.description, Some(err.to_string()))
                .into_response()
        }
        Err(err) => redirect_with_flash(
            &path(&["fleets"]),
            &Flash::error(format!("Unable to create fleet: {}", err.describe())),
        )
        .into_response(),
    }
}

/// `GET /fleets/{id}/edit` — form pre-filled with the current values.
pub async fn edit_form<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path(id): Path<String>,
) -> Result<FleetFormTemplate, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let id: FleetId = id.parse()?;
    let mut cache = RequestCache::new();
    let fleet = state.fleet_service.get_fleet(&mut cache, &id).await?;

    Ok(FleetFormTemplate::edit(
        &id,
        fleet.name,
        fleet.description.unwrap_or_default(),
        None,
    ))
}

/// `POST /fleets/{id}/edit` — update a fleet (PRG).
pub async fn update<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path(id): Path<String>,
    Form(form): Form<FleetForm>,
) -> Result<Response, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let id: FleetId = id.parse()?;
    let response = match state
        .fleet_service
        .update_fleet(id.clone(), &form.name, &form.description)
        .await
    {
        Ok(fleet) => redirect_with_flash(
            &path(&["fleets"]),
            &Flash::success(format!("Fleet {} updated.", fleet.name)),
        )
        .into_response(),
        Err(IotFleetError::Validation(err)) => {
            FleetFormTemplate::edit(&id, form.name, form.description, Some(err.to_string()))
                .into_response()
        }
        Err(err) => redirect_with_flash(
            &path(&["fleets"]),
            &Flash::error(format!("Unable to update fleet: {}", err.describe())),
        )
        .into_response(),
    };
    Ok(response)
}

/// `POST /fleets/{id}/delete` — delete a fleet and go back to the list.
pub async fn delete<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path(id): Path<String>,
) -> Result<Redirect, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let id: FleetId = id.parse()?;
    let flash = match state.fleet_service.delete_fleet(&id).await {
        Ok(()) => Flash::success(format!("Deleted Fleet: {id}")),
        Err(err) => Flash::error(format!("Unable to delete fleet: {}", err.describe())),
    };
    Ok(redirect_with_flash(&path(&["fleets"]), &flash))
}

/// `GET /fleets/{id}` — overview with boards and fleet-level plugins.
pub async fn detail<FG, BG, PG>(
    State(state): State<AppState<FG, BG, PG>>,
    Path(id): Path<String>,
    Query(flash): Query<FlashQuery>,
) -> Result<FleetDetailTemplate, DashboardError>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    let id: FleetId = id.parse()?;
    let mut cache = RequestCache::new();
    let detail = state.fleet_service.fleet_detail(&mut cache, &id).await?;
    let fleet = detail.fleet;

    Ok(FleetDetailTemplate {
        flash: flash.into_flash(),
        edit_path: path(&["fleets", id.as_str(), "edit"]),
        created: fleet
            .created_at
            .as_ref()
            .map_or_else(|| EMPTY.to_string(), time::display),
        updated: fleet
            .updated_at
            .as_ref()
            .map_or_else(|| EMPTY.to_string(), time::display),
        description: fleet.description.unwrap_or_else(|| EMPTY.to_string()),
        name: fleet.name,
        boards: detail.boards.into_iter().map(BoardRow::from).collect(),
        plugins: detail
            .plugins
            .into_iter()
            .map(|injection| PluginRow::new(&id, injection))
            .collect(),
        id: fleet.id.to_string(),
    })
}
