//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod fleet_service;
pub mod plugin_action_service;
pub mod status_reconciler;
