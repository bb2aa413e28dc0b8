//! # iotfleet-adapter-memory
//!
//! In-memory management API that behaves like the remote service.
//!
//! ## Provided data
//!
//! [`InMemoryIotronic::demo`] seeds two fleets:
//!
//! | Fleet | Boards | Fleet plugins |
//! |-------|--------|---------------|
//! | `greenhouse` | `gh-sensor-01` (online), `gh-valve-02` (stale listing, live offline), `gh-gateway-03` (no status) | `soil-monitor` |
//! | `warehouse` | `wh-door-01` (`Enabled`) | — |
//!
//! Records are stored in their raw wire shape (mixed key names, numeric
//! ids) and normalized through the same domain constructors the HTTP
//! adapter uses.
//!
//! ## Failure injection
//!
//! Tests switch individual remote calls to failing with
//! [`InMemoryIotronic::fail`], to exercise degraded rendering.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `iotfleet-app` and `iotfleet-domain`.

mod demo;

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_domain::board::Board;
use iotfleet_domain::error::{IotFleetError, NotFoundError};
use iotfleet_domain::fleet::Fleet;
use iotfleet_domain::id::{BoardId, FleetId, PluginId};
use iotfleet_domain::injection::{self, Injection};
use serde_json::{Value, json};

/// Number of most recent calls kept for [`InMemoryIotronic::calls`].
pub const CALL_LOG_CAPACITY: usize = 256;

/// A remote call that can be switched to failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fault {
    ListFleets,
    ListBoards(FleetId),
    FleetInjections(FleetId),
    LiveBoard(BoardId),
    BoardInjections(BoardId),
    PluginCalls(BoardId),
}

/// Error returned by a call switched to failing.
#[derive(Debug, thiserror::Error)]
#[error("injected failure: {0:?}")]
pub struct InjectedFailure(pub Fault);

impl From<InjectedFailure> for IotFleetError {
    fn from(err: InjectedFailure) -> Self {
        IotFleetError::Upstream(Box::new(err))
    }
}

#[derive(Debug, Default)]
struct State {
    fleets: BTreeMap<FleetId, Value>,
    fleet_order: Vec<FleetId>,
    /// Board records as the fleet listing returns them; may lag behind
    /// `live_boards`.
    listed_boards: BTreeMap<FleetId, Vec<Value>>,
    live_boards: BTreeMap<BoardId, Value>,
    fleet_injections: BTreeMap<FleetId, Vec<Value>>,
    board_injections: BTreeMap<BoardId, Vec<Value>>,
    faults: HashSet<Fault>,
    calls: VecDeque<String>,
}

impl State {
    fn check(&mut self, call: String, fault: Fault) -> Result<(), InjectedFailure> {
        self.record(call);
        if self.faults.contains(&fault) {
            Err(InjectedFailure(fault))
        } else {
            Ok(())
        }
    }

    fn record(&mut self, call: String) {
        if self.calls.len() == CALL_LOG_CAPACITY {
            self.calls.pop_front();
        }
        self.calls.push_back(call);
    }

    fn fleet_record(&self, id: &FleetId) -> Result<&Value, NotFoundError> {
        self.fleets.get(id).ok_or_else(|| NotFoundError {
            entity: "Fleet",
            id: id.to_string(),
        })
    }

    fn board_injection_mut(
        &mut self,
        board: &BoardId,
        plugin: &PluginId,
    ) -> Result<&mut Value, NotFoundError> {
        self.board_injections
            .get_mut(board)
            .and_then(|list| {
                list.iter_mut()
                    .find(|record| injection::plugin_id_from_record(record).as_ref() == Some(plugin))
            })
            .ok_or_else(|| NotFoundError {
                entity: "Plugin",
                id: plugin.to_string(),
            })
    }
}

/// Management API held entirely in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIotronic {
    state: Arc<Mutex<State>>,
}

impl InMemoryIotronic {
    /// An empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend seeded with the demo fleets.
    #[must_use]
    pub fn demo() -> Self {
        let backend = Self::new();
        demo::seed(&backend);
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store a raw fleet record. Ignored when it carries no identifier.
    pub fn insert_fleet(&self, record: Value) -> Option<FleetId> {
        let id = Fleet::from_record(&record)?.id;
        let mut state = self.lock();
        if state.fleets.insert(id.clone(), record).is_none() {
            state.fleet_order.push(id.clone());
        }
        Some(id)
    }

    /// Add a raw board record to a fleet's listing and to the live records.
    pub fn add_board(&self, fleet: &FleetId, record: Value) -> Option<BoardId> {
        let id = Board::from_record(&record)?.id;
        let mut state = self.lock();
        state.live_boards.insert(id.clone(), record.clone());
        state
            .listed_boards
            .entry(fleet.clone())
            .or_default()
            .push(record);
        Some(id)
    }

    /// Replace the live record of a board, leaving fleet listings stale.
    pub fn set_live_board(&self, record: Value) -> Option<BoardId> {
        let id = Board::from_record(&record)?.id;
        self.lock().live_boards.insert(id.clone(), record);
        Some(id)
    }

    /// Drop the live record of a board, as if it vanished after listing.
    pub fn forget_live_board(&self, board: &BoardId) {
        self.lock().live_boards.remove(board);
    }

    /// Add a raw injection record at fleet scope.
    pub fn inject_on_fleet(&self, fleet: &FleetId, record: Value) {
        self.lock()
            .fleet_injections
            .entry(fleet.clone())
            .or_default()
            .push(record);
    }

    /// Add a raw injection record at board scope.
    pub fn inject_on_board(&self, board: &BoardId, record: Value) {
        self.lock()
            .board_injections
            .entry(board.clone())
            .or_default()
            .push(record);
    }

    /// Make `fault` fail from now on.
    pub fn fail(&self, fault: Fault) {
        self.lock().faults.insert(fault);
    }

    /// Make `fault` succeed again.
    pub fn heal(&self, fault: &Fault) {
        self.lock().faults.remove(fault);
    }

    /// The last [`CALL_LOG_CAPACITY`] calls received, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.iter().cloned().collect()
    }
}

impl FleetGateway for InMemoryIotronic {
    async fn list_fleets(&self) -> Result<Vec<Fleet>, IotFleetError> {
        let mut state = self.lock();
        state.check("list_fleets".to_string(), Fault::ListFleets)?;
        Ok(state
            .fleet_order
            .iter()
            .filter_map(|id| state.fleets.get(id))
            .filter_map(Fleet::from_record)
            .collect())
    }

    async fn get_fleet(&self, id: &FleetId) -> Result<Option<Fleet>, IotFleetError> {
        let mut state = self.lock();
        state.record(format!("get_fleet {id}"));
        Ok(state.fleets.get(id).and_then(Fleet::from_record))
    }

    async fn create_fleet(&self, fleet: Fleet) -> Result<Fleet, IotFleetError> {
        let record = json!({
            "uuid": fleet.id,
            "name": fleet.name,
            "description": fleet.description,
            "created_at": iotfleet_domain::time::now(),
        });
        let mut state = self.lock();
        state.record(format!("create_fleet {}", fleet.id));
        state.fleet_order.push(fleet.id.clone());
        state.fleets.insert(fleet.id.clone(), record.clone());
        Ok(Fleet::from_record(&record).unwrap_or(fleet))
    }

    async fn update_fleet(&self, fleet: Fleet) -> Result<Fleet, IotFleetError> {
        let mut state = self.lock();
        state.record(format!("update_fleet {}", fleet.id));
        let record = state
            .fleets
            .get_mut(&fleet.id)
            .ok_or_else(|| NotFoundError {
                entity: "Fleet",
                id: fleet.id.to_string(),
            })?;
        record["name"] = json!(fleet.name);
        record["description"] = json!(fleet.description);
        record["updated_at"] = json!(iotfleet_domain::time::now());
        Ok(Fleet::from_record(record).unwrap_or(fleet))
    }

    async fn delete_fleet(&self, id: &FleetId) -> Result<(), IotFleetError> {
        let mut state = self.lock();
        state.record(format!("delete_fleet {id}"));
        state.fleet_record(id)?;
        state.fleets.remove(id);
        state.fleet_order.retain(|existing| existing != id);
        state.listed_boards.remove(id);
        state.fleet_injections.remove(id);
        Ok(())
    }

    async fn list_boards(&self, fleet: &FleetId) -> Result<Vec<Board>, IotFleetError> {
        let mut state = self.lock();
        state.check(format!("list_boards {fleet}"), Fault::ListBoards(fleet.clone()))?;
        state.fleet_record(fleet)?;
        Ok(state
            .listed_boards
            .get(fleet)
            .map(|records| records.iter().filter_map(Board::from_record).collect())
            .unwrap_or_default())
    }

    async fn list_fleet_injections(&self, fleet: &FleetId) -> Result<Vec<Injection>, IotFleetError> {
        let mut state = self.lock();
        state.check(
            format!("list_fleet_injections {fleet}"),
            Fault::FleetInjections(fleet.clone()),
        )?;
        state.fleet_record(fleet)?;
        Ok(state
            .fleet_injections
            .get(fleet)
            .map(|records| records.iter().filter_map(Injection::from_record).collect())
            .unwrap_or_default())
    }
}

impl BoardGateway for InMemoryIotronic {
    async fn get_board(&self, id: &BoardId) -> Result<Option<Board>, IotFleetError> {
        let mut state = self.lock();
        state.check(format!("get_board {id}"), Fault::LiveBoard(id.clone()))?;
        Ok(state.live_boards.get(id).and_then(Board::from_record))
    }

    async fn list_board_injections(&self, id: &BoardId) -> Result<Vec<Injection>, IotFleetError> {
        let mut state = self.lock();
        state.check(
            format!("list_board_injections {id}"),
            Fault::BoardInjections(id.clone()),
        )?;
        Ok(state
            .board_injections
            .get(id)
            .map(|records| records.iter().filter_map(Injection::from_record).collect())
            .unwrap_or_default())
    }
}

impl PluginGateway for InMemoryIotronic {
    async fn plugin_action(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        action: &str,
        params: Value,
    ) -> Result<(), IotFleetError> {
        let mut state = self.lock();
        state.check(
            format!("plugin_action {board} {plugin} {action} {params}"),
            Fault::PluginCalls(board.clone()),
        )?;
        let status = match action {
            "PluginStart" => "running",
            "PluginStop" => "stopped",
            _ => return Ok(()),
        };
        state.board_injection_mut(board, plugin)?["status"] = json!(status);
        tracing::debug!(%board, %plugin, status, "plugin state changed");
        Ok(())
    }

    async fn remove_plugin(&self, board: &BoardId, plugin: &PluginId) -> Result<(), IotFleetError> {
        let mut state = self.lock();
        state.check(
            format!("remove_plugin {board} {plugin}"),
            Fault::PluginCalls(board.clone()),
        )?;
        state.board_injection_mut(board, plugin)?;
        if let Some(list) = state.board_injections.get_mut(board) {
            list.retain(|record| injection::plugin_id_from_record(record).as_ref() != Some(plugin));
        }
        Ok(())
    }

    async fn inject_plugin(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        onboot: bool,
    ) -> Result<(), IotFleetError> {
        let mut state = self.lock();
        state.check(
            format!("inject_plugin {board} {plugin} onboot={onboot}"),
            Fault::PluginCalls(board.clone()),
        )?;
        if !state.live_boards.contains_key(board) {
            return Err(NotFoundError {
                entity: "Board",
                id: board.to_string(),
            }
            .into());
        }
        let list = state.board_injections.entry(board.clone()).or_default();
        list.retain(|record| injection::plugin_id_from_record(record).as_ref() != Some(plugin));
        list.push(json!({"plugin_uuid": plugin, "onboot": onboot, "status": "injected"}));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iotfleet_domain::board::BoardState;

    fn fleet_with_board() -> (InMemoryIotronic, FleetId, BoardId) {
        let api = InMemoryIotronic::new();
        let fleet = api.insert_fleet(json!({"uuid": "f1", "name": "lab"})).unwrap();
        let board = api
            .add_board(&fleet, json!({"uuid": "b1", "status": "online"}))
            .unwrap();
        (api, fleet, board)
    }

    #[tokio::test]
    async fn should_normalize_raw_records_on_read() {
        let api = InMemoryIotronic::new();
        let fleet = api.insert_fleet(json!({"id": 42, "name": "numeric"})).unwrap();
        api.add_board(&fleet, json!({"board_uuid": "b9", "board_status": "Enabled"}));
        api.inject_on_fleet(&fleet, json!({"plugin": {"id": 3}}));

        let boards = api.list_boards(&fleet).await.unwrap();
        let plugins = api.list_fleet_injections(&fleet).await.unwrap();

        assert_eq!(fleet.as_str(), "42");
        assert_eq!(boards[0].state(), BoardState::Online);
        assert_eq!(plugins[0].plugin_id.as_str(), "3");
    }

    #[tokio::test]
    async fn should_keep_listing_stale_after_live_update() {
        let (api, fleet, board) = fleet_with_board();
        api.set_live_board(json!({"uuid": "b1", "alive": false}));

        let listed = api.list_boards(&fleet).await.unwrap();
        let live = api.get_board(&board).await.unwrap().unwrap();

        assert_eq!(listed[0].state(), BoardState::Online);
        assert_eq!(live.state(), BoardState::Offline);
    }

    #[tokio::test]
    async fn should_fail_injected_call_until_healed() {
        let (api, fleet, _) = fleet_with_board();
        api.fail(Fault::ListBoards(fleet.clone()));

        let err = api.list_boards(&fleet).await.unwrap_err();
        assert!(matches!(err, IotFleetError::Upstream(_)));

        api.heal(&Fault::ListBoards(fleet.clone()));
        assert_eq!(api.list_boards(&fleet).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_report_missing_fleet_on_listing() {
        let api = InMemoryIotronic::new();
        let err = api.list_boards(&"nope".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, IotFleetError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_apply_plugin_lifecycle() {
        let (api, _, board) = fleet_with_board();
        let plugin: PluginId = "p1".parse().unwrap();

        api.inject_plugin(&board, &plugin, false).await.unwrap();
        api.plugin_action(&board, &plugin, "PluginStart", json!({}))
            .await
            .unwrap();
        let injections = api.list_board_injections(&board).await.unwrap();
        assert_eq!(injections[0].status.as_deref(), Some("running"));
        assert_eq!(injections[0].onboot, Some(false));

        api.remove_plugin(&board, &plugin).await.unwrap();
        assert!(api.list_board_injections(&board).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_action_on_plugin_not_injected() {
        let (api, _, board) = fleet_with_board();

        let err = api
            .plugin_action(&board, &"p1".parse().unwrap(), "PluginStop", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, IotFleetError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_create_update_and_delete_fleet() {
        let api = InMemoryIotronic::new();
        let fleet = Fleet::builder().name("lab").build().unwrap();

        let created = api.create_fleet(fleet).await.unwrap();
        assert!(created.created_at.is_some());

        let renamed = Fleet::builder()
            .id(created.id.clone())
            .name("bench")
            .description("soldering")
            .build()
            .unwrap();
        let updated = api.update_fleet(renamed).await.unwrap();
        assert_eq!(updated.name, "bench");
        assert!(updated.updated_at.is_some());

        api.delete_fleet(&created.id).await.unwrap();
        assert!(api.get_fleet(&created.id).await.unwrap().is_none());
        assert!(api.list_fleets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_record_calls_in_order() {
        let (api, fleet, board) = fleet_with_board();

        api.list_boards(&fleet).await.unwrap();
        api.get_board(&board).await.unwrap();

        assert_eq!(api.calls(), ["list_boards f1", "get_board b1"]);
    }

    #[tokio::test]
    async fn should_keep_only_most_recent_calls() {
        let api = InMemoryIotronic::demo();

        for _ in 0..CALL_LOG_CAPACITY * 4 {
            api.list_fleets().await.unwrap();
        }
        api.get_board(&"gh-sensor-01".parse().unwrap()).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), CALL_LOG_CAPACITY);
        assert_eq!(calls.last().map(String::as_str), Some("get_board gh-sensor-01"));
    }

    #[tokio::test]
    async fn should_seed_demo_fleets() {
        let api = InMemoryIotronic::demo();

        let fleets = api.list_fleets().await.unwrap();

        assert_eq!(fleets.len(), 2);
        assert!(fleets.iter().any(|f| f.id.as_str() == demo::GREENHOUSE));
    }
}
