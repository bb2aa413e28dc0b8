//! # iotfleet-adapter-iotronic
//!
//! Iotronic adapter — implements the management API ports over HTTP.
//!
//! ## Responsibilities
//! - Build requests against the `/v1` REST API with `X-Auth-Token` auth
//! - Map `404` on single-record reads to `None`
//! - Accept list bodies both bare and wrapped under a collection key
//! - Convert every wire record into its canonical domain type before it
//!   leaves this crate
//!
//! ## Dependency rule
//! Same as other adapters: depends on `iotfleet-app` and `iotfleet-domain`.

mod body;
pub mod config;
pub mod error;

use std::time::Duration;

use iotfleet_app::ports::{BoardGateway, FleetGateway, PluginGateway};
use iotfleet_domain::board::Board;
use iotfleet_domain::error::IotFleetError;
use iotfleet_domain::fleet::Fleet;
use iotfleet_domain::id::{BoardId, FleetId, PluginId};
use iotfleet_domain::injection::Injection;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use url::Url;

pub use config::IotronicConfig;
pub use error::IotronicError;

const AUTH_HEADER: &str = "X-Auth-Token";
const API_VERSION: &str = "v1";

const FLEET_LIST_KEYS: &[&str] = &["fleets"];
const BOARD_LIST_KEYS: &[&str] = &["boards"];
const INJECTION_LIST_KEYS: &[&str] = &["injections", "plugins"];

/// HTTP client for the remote management API.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct IotronicClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl IotronicClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IotronicError::BaseUrl`] when `base_url` is not an
    /// absolute URL with a path, or [`IotronicError::Client`] when the
    /// HTTP client cannot be initialised.
    pub fn new(config: &IotronicConfig) -> Result<Self, IotronicError> {
        let base = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| IotronicError::BaseUrl(config.base_url.clone()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(IotronicError::Client)?;

        Ok(Self {
            http,
            base,
            token: config.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(API_VERSION).extend(segments);
        }
        url
    }

    /// Send one request. `Ok(None)` on `404`, `Value::Null` on an empty
    /// success body.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<&Value>,
    ) -> Result<Option<Value>, IotronicError> {
        let url = self.endpoint(segments);
        let path = url.path().to_string();

        let mut request = self.http.request(method.clone(), url);
        if let Some(token) = &self.token {
            request = request.header(AUTH_HEADER, token);
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        tracing::debug!(%method, %path, "calling management API");
        let transport = |source| IotronicError::Transport {
            method: method.clone(),
            path: path.clone(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(IotronicError::Status {
                method,
                path,
                status: status.as_u16(),
                message: error::remote_message(&text),
            });
        }
        if text.trim().is_empty() {
            return Ok(Some(Value::Null));
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| IotronicError::Body {
                path,
                reason: err.to_string(),
            })
    }

    async fn send_required(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<&Value>,
        entity: &'static str,
        id: &str,
    ) -> Result<Value, IotronicError> {
        self.send(method, segments, payload)
            .await?
            .ok_or_else(|| IotronicError::NotFound {
                entity,
                id: id.to_string(),
            })
    }

    async fn fetch_list<T, F>(
        &self,
        segments: &[&str],
        keys: &[&str],
        owner: (&'static str, &str),
        convert: F,
    ) -> Result<Vec<T>, IotronicError>
    where
        F: Fn(&Value) -> Option<T>,
    {
        let (entity, id) = owner;
        let body = self
            .send_required(Method::GET, segments, None, entity, id)
            .await?;
        let path = segments.join("/");
        let items = body::list_items(&body, keys, &path)?;
        Ok(body::convert_all(items, &path, convert))
    }

    async fn fetch_record<T, F>(&self, segments: &[&str], convert: F) -> Result<Option<T>, IotronicError>
    where
        F: Fn(&Value) -> Option<T>,
    {
        let Some(body) = self.send(Method::GET, segments, None).await? else {
            return Ok(None);
        };
        convert(&body).map(Some).ok_or_else(|| IotronicError::Body {
            path: segments.join("/"),
            reason: "record has no identifier".to_string(),
        })
    }
}

fn fleet_patch(fleet: &Fleet) -> Value {
    json!([
        {"op": "replace", "path": "/name", "value": fleet.name},
        {"op": "replace", "path": "/description", "value": fleet.description.as_deref().unwrap_or_default()},
    ])
}

impl FleetGateway for IotronicClient {
    async fn list_fleets(&self) -> Result<Vec<Fleet>, IotFleetError> {
        Ok(self
            .fetch_list(&["fleets"], FLEET_LIST_KEYS, ("Collection", "fleets"), Fleet::from_record)
            .await?)
    }

    async fn get_fleet(&self, id: &FleetId) -> Result<Option<Fleet>, IotFleetError> {
        Ok(self
            .fetch_record(&["fleets", id.as_str()], Fleet::from_record)
            .await?)
    }

    async fn create_fleet(&self, fleet: Fleet) -> Result<Fleet, IotFleetError> {
        let payload = json!({
            "name": fleet.name,
            "description": fleet.description,
        });
        let body = self
            .send_required(Method::POST, &["fleets"], Some(&payload), "Collection", "fleets")
            .await?;
        Ok(Fleet::from_record(&body).unwrap_or(fleet))
    }

    async fn update_fleet(&self, fleet: Fleet) -> Result<Fleet, IotFleetError> {
        let body = self
            .send_required(
                Method::PATCH,
                &["fleets", fleet.id.as_str()],
                Some(&fleet_patch(&fleet)),
                "Fleet",
                fleet.id.as_str(),
            )
            .await?;
        Ok(Fleet::from_record(&body).unwrap_or(fleet))
    }

    async fn delete_fleet(&self, id: &FleetId) -> Result<(), IotFleetError> {
        self.send_required(Method::DELETE, &["fleets", id.as_str()], None, "Fleet", id.as_str())
            .await?;
        Ok(())
    }

    async fn list_boards(&self, fleet: &FleetId) -> Result<Vec<Board>, IotFleetError> {
        Ok(self
            .fetch_list(
                &["fleets", fleet.as_str(), "boards"],
                BOARD_LIST_KEYS,
                ("Fleet", fleet.as_str()),
                Board::from_record,
            )
            .await?)
    }

    async fn list_fleet_injections(&self, fleet: &FleetId) -> Result<Vec<Injection>, IotFleetError> {
        Ok(self
            .fetch_list(
                &["fleets", fleet.as_str(), "plugins"],
                INJECTION_LIST_KEYS,
                ("Fleet", fleet.as_str()),
                Injection::from_record,
            )
            .await?)
    }
}

impl BoardGateway for IotronicClient {
    async fn get_board(&self, id: &BoardId) -> Result<Option<Board>, IotFleetError> {
        Ok(self
            .fetch_record(&["boards", id.as_str()], Board::from_record)
            .await?)
    }

    async fn list_board_injections(&self, id: &BoardId) -> Result<Vec<Injection>, IotFleetError> {
        Ok(self
            .fetch_list(
                &["boards", id.as_str(), "plugins"],
                INJECTION_LIST_KEYS,
                ("Board", id.as_str()),
                Injection::from_record,
            )
            .await?)
    }
}

impl PluginGateway for IotronicClient {
    async fn plugin_action(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        action: &str,
        params: Value,
    ) -> Result<(), IotFleetError> {
        let payload = json!({"action": action, "parameters": params});
        self.send_required(
            Method::POST,
            &["boards", board.as_str(), "plugins", plugin.as_str()],
            Some(&payload),
            "Plugin",
            plugin.as_str(),
        )
        .await?;
        Ok(())
    }

    async fn remove_plugin(&self, board: &BoardId, plugin: &PluginId) -> Result<(), IotFleetError> {
        self.send_required(
            Method::DELETE,
            &["boards", board.as_str(), "plugins", plugin.as_str()],
            None,
            "Plugin",
            plugin.as_str(),
        )
        .await?;
        Ok(())
    }

    async fn inject_plugin(
        &self,
        board: &BoardId,
        plugin: &PluginId,
        onboot: bool,
    ) -> Result<(), IotFleetError> {
        let payload = json!({"plugin": plugin, "onboot": onboot});
        self.send_required(
            Method::POST,
            &["boards", board.as_str(), "plugins"],
            Some(&payload),
            "Board",
            board.as_str(),
        )
        .await?;
        Ok(())
    }
}
