//! # iotfleet-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `FleetGateway` — fleet CRUD, fleet boards, fleet-level injections
//!   - `BoardGateway` — live board records, board-level injections
//!   - `PluginGateway` — start / stop / remove / inject a plugin on a board
//! - Define **driving/inbound ports** as use-case structs:
//!   - `FleetService` — list, filter, get, create, update, delete, detail
//!   - `StatusReconciler` — per-board plugin status on a fleet
//!   - `PluginActionService` — dispatch an action, report a flash message
//! - Provide the **request-scoped cache** passed through a single request
//!
//! ## Dependency rule
//! Depends on `iotfleet-domain` only (plus `tokio::time` for deadlines).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod deadline;
pub mod flash;
pub mod ports;
pub mod request_cache;
pub mod services;
