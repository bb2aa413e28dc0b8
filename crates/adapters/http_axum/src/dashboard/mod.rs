//! Server-side rendered HTML dashboard (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod fleets;
pub mod flash;
#[allow(clippy::missing_errors_doc)]
pub mod plugin_status;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};

use iotfleet_app::flash::Flash;
use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_domain::error::{IotFleetError, ValidationError};

use crate::error::status_of;
use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<FG, BG, PG>() -> Router<AppState<FG, BG, PG>>
where
    FG: FleetGateway + Send + Sync + 'static,
    BG: BoardGateway + Send + Sync + 'static,
    PG: PluginGateway + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::to("/fleets") }))
        .route(
            "/fleets",
            get(fleets::list::<FG, BG, PG>).post(fleets::create::<FG, BG, PG>),
        )
        .route("/fleets/new", get(fleets::new_form))
        .route("/fleets/{id}", get(fleets::detail::<FG, BG, PG>))
        .route(
            "/fleets/{id}/edit",
            get(fleets::edit_form::<FG, BG, PG>).post(fleets::update::<FG, BG, PG>),
        )
        .route("/fleets/{id}/delete", post(fleets::delete::<FG, BG, PG>))
        .route(
            "/fleets/{fleet}/plugins/{plugin}/status",
            get(plugin_status::table::<FG, BG, PG>),
        )
        .route(
            "/fleets/{fleet}/plugins/{plugin}/boards/{board}/{action}",
            post(plugin_status::run_action::<FG, BG, PG>),
        )
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    flash: Option<Flash>,
    status: u16,
    reason: &'static str,
    message: String,
}

/// Renders an [`IotFleetError`] as an HTML error page.
#[derive(Debug)]
pub struct DashboardError(IotFleetError);

impl From<IotFleetError> for DashboardError {
    fn from(err: IotFleetError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let message = self.0.describe();
        if status.is_server_error() {
            tracing::error!(error = %message, "dashboard page failed");
        }
        let page = ErrorTemplate {
            flash: None,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "unable to render error page");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
