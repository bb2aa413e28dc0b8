//! Plugin port — state changes of a plugin on one board.

use std::future::Future;

use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::id::{BoardId, PluginId};

/// Remote plugin operations on a single board.
pub trait PluginGateway {
    /// Run a named plugin action (e.g. `PluginStart`) with parameters.
    fn plugin_action(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        action: &str,
        params: serde_json::Value,
    ) -> impl Future<Output = Result<(), IotFleetError>> + Send;

    /// Remove a plugin from a board.
    fn remove_plugin(
        &self,
        board: &BoardId,
        plugin: &PluginId,
    ) -> impl Future<Output = Result<(), IotFleetError>> + Send;

    /// Inject a plugin on a board; `onboot` makes it start with the board.
    fn inject_plugin(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        onboot: bool,
    ) -> impl Future<Output = Result<(), IotFleetError>> + Send;
}

macro_rules! forward_plugin_gateway {
    ($($ty:ty),+) => {$(
        impl<T: PluginGateway + Send + Sync + ?Sized> PluginGateway for $ty {
            fn plugin_action(
                &self,
                board: &BoardId,
                plugin: &PluginId,
                action: &str,
                params: serde_json::Value,
            ) -> impl Future<Output = Result<(), IotFleetError>> + Send {
                (**self).plugin_action(board, plugin, action, params)
            }

            fn remove_plugin(
                &self,
                board: &BoardId,
                plugin: &PluginId,
            ) -> impl Future<Output = Result<(), IotFleetError>> + Send {
                (**self).remove_plugin(board, plugin)
            }

            fn inject_plugin(
                &self,
                board: &BoardId,
                plugin: &PluginId,
                onboot: bool,
            ) -> impl Future<Output = Result<(), IotFleetError>> + Send {
                (**self).inject_plugin(board, plugin, onboot)
            }
        }
    )+};
}

forward_plugin_gateway!(&T, std::sync::Arc<T>);
