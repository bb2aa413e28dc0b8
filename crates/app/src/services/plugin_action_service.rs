//! Plugin action service — start, stop, remove or re-inject a plugin on a
//! single board and report the outcome as a flash message.

use iotfleet_domain::action::PluginAction;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::id::{BoardId, PluginId};

use crate::flash::Flash;
use crate::ports::PluginGateway;

/// Dispatches [`PluginAction`]s to the remote API.
pub struct PluginActionService<P> {
    gateway: P,
}

impl<P: PluginGateway> PluginActionService<P> {
    pub fn new(gateway: P) -> Self {
        Self { gateway }
    }

    /// Run `action` for `plugin` on `board`.
    ///
    /// Never fails: the remote error, if any, becomes an error flash.
    #[tracing::instrument(skip_all, fields(board = %board, plugin = %plugin, action = %action))]
    pub async fn run(&self, board: &BoardId, plugin: &PluginId, action: PluginAction) -> Flash {
        match self.dispatch(board, plugin, action).await {
            Ok(()) => {
                tracing::info!("plugin action completed");
                Flash::success(action.success_message(board.as_str()))
            }
            Err(err) => {
                let cause = err.describe();
                tracing::warn!(error = %cause, "plugin action failed");
                Flash::error(action.failure_message(&cause))
            }
        }
    }

    async fn dispatch(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        action: PluginAction,
    ) -> Result<(), IotFleetError> {
        match action {
            PluginAction::Start | PluginAction::Stop => {
                let name = action.remote_name().unwrap_or_default();
                self.gateway
                    .plugin_action(board, plugin, name, serde_json::json!({}))
                    .await
            }
            PluginAction::Remove => self.gateway.remove_plugin(board, plugin).await,
            PluginAction::Reinject => self.gateway.inject_plugin(board, plugin, false).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flash::FlashLevel;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingGateway {
        fn record(&self, call: String) -> Result<(), IotFleetError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(IotFleetError::Upstream("agent offline".into()))
            } else {
                Ok(())
            }
        }
    }

    impl PluginGateway for RecordingGateway {
        async fn plugin_action(
            &self,
            board: &BoardId,
            plugin: &PluginId,
            action: &str,
            params: serde_json::Value,
        ) -> Result<(), IotFleetError> {
            self.record(format!("action {board} {plugin} {action} {params}"))
        }

        async fn remove_plugin(
            &self,
            board: &BoardId,
            plugin: &PluginId,
        ) -> Result<(), IotFleetError> {
            self.record(format!("remove {board} {plugin}"))
        }

        async fn inject_plugin(
            &self,
            board: &BoardId,
            plugin: &PluginId,
            onboot: bool,
        ) -> Result<(), IotFleetError> {
            self.record(format!("inject {board} {plugin} onboot={onboot}"))
        }
    }

    fn ids() -> (BoardId, PluginId) {
        ("b1".parse().unwrap(), "p1".parse().unwrap())
    }

    #[tokio::test]
    async fn should_route_each_action_to_its_remote_call() {
        let svc = PluginActionService::new(RecordingGateway::default());
        let (board, plugin) = ids();

        for action in PluginAction::ALL {
            svc.run(&board, &plugin, action).await;
        }

        let calls = svc.gateway.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "action b1 p1 PluginStart {}",
                "action b1 p1 PluginStop {}",
                "inject b1 p1 onboot=false",
                "remove b1 p1",
            ]
        );
    }

    #[tokio::test]
    async fn should_report_success_flash() {
        let svc = PluginActionService::new(RecordingGateway::default());
        let (board, plugin) = ids();

        let flash = svc.run(&board, &plugin, PluginAction::Start).await;

        assert_eq!(flash.level, FlashLevel::Success);
        assert_eq!(flash.message, "Plugin started on board b1.");
    }

    #[tokio::test]
    async fn should_turn_remote_failure_into_error_flash() {
        let svc = PluginActionService::new(RecordingGateway {
            fail: true,
            ..RecordingGateway::default()
        });
        let (board, plugin) = ids();

        let flash = svc.run(&board, &plugin, PluginAction::Stop).await;

        assert!(flash.is_error());
        assert_eq!(
            flash.message,
            "Unable to stop plugin on board: upstream error: agent offline"
        );
    }
}
