//! Status reconciler — plugin presence on every board of a fleet.
//!
//! For one `(fleet, plugin)` pair the reconciler fetches the fleet's boards
//! and fleet-level injections once, then enriches each board with a live
//! status refresh and its board-level injections. Failing to list boards or
//! fleet injections aborts the whole listing; failing to enrich a single
//! board only degrades that board's row.

use std::time::Duration;

use iotfleet_domain::board::Board;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::id::{BoardId, FleetId, PluginId};
use iotfleet_domain::injection::{Injection, contains_plugin};
use iotfleet_domain::status::StatusRow;

use crate::deadline::{self, DEFAULT_CALL_TIMEOUT};
use crate::ports::{BoardGateway, FleetGateway};
use crate::request_cache::RequestCache;

/// Rows to render plus the single user-facing error of a failed listing.
#[derive(Debug, Default)]
pub struct PluginStatusReport {
    pub rows: Vec<StatusRow>,
    pub error: Option<String>,
}

/// Outcome of the best-effort lookups made for one board.
#[derive(Debug)]
struct BoardProbe {
    live: Result<Option<Board>, IotFleetError>,
    injections: Result<Vec<Injection>, IotFleetError>,
}

impl BoardProbe {
    /// Fold the probe into a row.
    ///
    /// - `live`: fresh fields are merged on success; the cached board from
    ///   the fleet listing is used as-is on failure or when not found.
    /// - `injections`: on failure the plugin counts as not injected at
    ///   board scope.
    fn into_row(self, mut board: Board, plugin: &PluginId, plugin_in_fleet: bool) -> StatusRow {
        match self.live {
            Ok(Some(live)) => board.refresh_from(live),
            Ok(None) => {
                tracing::debug!(board = %board.id, "board missing on live refresh, keeping listed record");
            }
            Err(err) => {
                tracing::warn!(board = %board.id, error = %err.describe(), "live board refresh failed");
            }
        }

        let plugin_in_board = match self.injections {
            Ok(injections) => contains_plugin(&injections, plugin),
            Err(err) => {
                tracing::warn!(board = %board.id, error = %err.describe(), "board injection lookup failed");
                false
            }
        };

        StatusRow::new(&board, plugin_in_board, plugin_in_fleet)
    }
}

/// Builds the "plugin status on fleet" table.
pub struct StatusReconciler<F, B> {
    fleets: F,
    boards: B,
    call_timeout: Duration,
}

impl<F: FleetGateway, B: BoardGateway> StatusReconciler<F, B> {
    /// Create a reconciler reading fleets and boards from the given ports.
    pub fn new(fleets: F, boards: B) -> Self {
        Self {
            fleets,
            boards,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the deadline applied to each remote call.
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// One row per board of `fleet`, in listing order, describing whether
    /// `plugin` is present on it and at which scope.
    ///
    /// # Errors
    ///
    /// Returns the error of listing the fleet's boards or its fleet-level
    /// injections. Per-board failures never surface here.
    #[tracing::instrument(skip_all, fields(fleet = %fleet, plugin = %plugin))]
    pub async fn reconcile(
        &self,
        cache: &mut RequestCache,
        fleet: &FleetId,
        plugin: &PluginId,
    ) -> Result<Vec<StatusRow>, IotFleetError> {
        let boards = cache
            .fleet_boards
            .get_or_try_fetch(fleet, || {
                deadline::within(self.call_timeout, "list_boards", self.fleets.list_boards(fleet))
            })
            .await?;

        let fleet_injections = cache
            .fleet_injections
            .get_or_try_fetch(fleet, || {
                deadline::within(
                    self.call_timeout,
                    "list_fleet_injections",
                    self.fleets.list_fleet_injections(fleet),
                )
            })
            .await?;
        let plugin_in_fleet = contains_plugin(&fleet_injections, plugin);

        let mut rows = Vec::with_capacity(boards.len());
        for board in boards {
            let probe = self.probe(cache, &board.id).await;
            rows.push(probe.into_row(board, plugin, plugin_in_fleet));
        }

        tracing::debug!(rows = rows.len(), plugin_in_fleet, "plugin status reconciled");
        Ok(rows)
    }

    /// Same as [`reconcile`](Self::reconcile), with a failed listing turned
    /// into an empty row set and one error message for the user.
    pub async fn plugin_status(
        &self,
        cache: &mut RequestCache,
        fleet: &FleetId,
        plugin: &PluginId,
    ) -> PluginStatusReport {
        match self.reconcile(cache, fleet, plugin).await {
            Ok(rows) => PluginStatusReport { rows, error: None },
            Err(err) => {
                let cause = err.describe();
                tracing::error!(%fleet, %plugin, error = %cause, "unable to load plugin status");
                PluginStatusReport {
                    rows: Vec::new(),
                    error: Some(format!("Unable to load plugin status: {cause}")),
                }
            }
        }
    }

    async fn probe(&self, cache: &mut RequestCache, board: &BoardId) -> BoardProbe {
        let live = cache
            .boards
            .get_or_try_fetch(board, || {
                deadline::within(self.call_timeout, "get_board", self.boards.get_board(board))
            })
            .await;

        let injections = cache
            .board_injections
            .get_or_try_fetch(board, || {
                deadline::within(
                    self.call_timeout,
                    "list_board_injections",
                    self.boards.list_board_injections(board),
                )
            })
            .await;

        BoardProbe { live, injections }
    }
}
