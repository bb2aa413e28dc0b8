//! # iotfleet-domain
//!
//! Pure domain model for the iotfleet administration dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Boards** (managed IoT devices) and their normalized state
//! - Define **Fleets** (named groups of boards)
//! - Define **Injections** (a plugin deployed on a board or a fleet)
//! - Define **Status rows** (per-board plugin presence on a fleet)
//! - Define **Plugin actions** (start, stop, remove, re-inject)
//! - Convert heterogeneous remote records into canonical types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;
pub mod time;

pub mod action;
pub mod board;
pub mod fleet;
pub mod injection;
pub mod status;
