//! Port definitions — traits that adapters implement.
//!
//! Every port is a view onto the remote management API. Adapters convert
//! whatever the wire carries into canonical domain records before returning,
//! so services never see raw JSON.

pub mod board;
pub mod fleet;
pub mod plugin;

pub use board::BoardGateway;
pub use fleet::FleetGateway;
pub use plugin::PluginGateway;
