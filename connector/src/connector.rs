use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::info;
use vantiq::client::resources;
use vantiq::{Vantiq, VantiqError};

use crate::config::ConnectorConfig;

/// Platform procedure that reports the control actions available to
/// adapters.
const SUPPORTED_ACTIONS_PROCEDURE: &str = "SystemAdapterControlActions";

/// Connection failures, classified for the host's connection management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// 401 from the authentication endpoint
    InvalidCredentials,
    /// 404 — the configured server is not a Vantiq API endpoint
    UnknownHost,
    /// 5xx from the server
    ServerError(u16),
    /// Any other non-2xx authentication response
    AuthenticationFailed(u16),
    /// The server could not be reached at all
    Unreachable(String),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidCredentials => write!(f, "invalid credentials"),
            ConnectionError::UnknownHost => write!(f, "invalid Vantiq server"),
            ConnectionError::ServerError(status) => {
                write!(f, "Vantiq server error (status {})", status)
            }
            ConnectionError::AuthenticationFailed(status) => {
                write!(f, "Vantiq authentication request failed (status {})", status)
            }
            ConnectionError::Unreachable(detail) => {
                write!(f, "Vantiq server unreachable: {}", detail)
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Connector between an integration-bus runtime and a Vantiq system.
///
/// Holds the connection configuration and one authenticated client. Every
/// operation is a direct translation onto the Vantiq REST API; blocking,
/// retrying, and scheduling belong to the host runtime.
pub struct VantiqConnector {
    config: ConnectorConfig,
    client: Vantiq,
}

impl VantiqConnector {
    /// Creates a connector from configuration. No connection is made until
    /// [`connect`](Self::connect) is called.
    pub fn new(config: ConnectorConfig) -> Self {
        let client = Vantiq::with_timeout(
            config.server.clone(),
            config.api_version,
            Duration::from_secs(config.timeout_seconds),
        );
        Self { config, client }
    }

    /// Authenticates against the configured server, classifying failures for
    /// the host's connection management.
    pub async fn connect(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ConnectionError> {
        match self.client.authenticate(username, password).await {
            Ok(()) => {
                info!(username = %username, server = %self.config.server, "Authenticated with Vantiq");
                Ok(())
            }
            Err(VantiqError::Server { status: 401, .. }) => {
                Err(ConnectionError::InvalidCredentials)
            }
            Err(VantiqError::Server { status: 404, .. }) => Err(ConnectionError::UnknownHost),
            Err(VantiqError::Server { status, .. }) if status >= 500 => {
                Err(ConnectionError::ServerError(status))
            }
            Err(VantiqError::Server { status, .. }) => {
                Err(ConnectionError::AuthenticationFailed(status))
            }
            Err(e) => Err(ConnectionError::Unreachable(e.to_string())),
        }
    }

    /// Drops the current session.
    pub fn disconnect(&mut self) {
        self.client.clear_access_token();
    }

    /// Whether a session token is held.
    pub fn is_connected(&self) -> bool {
        self.client.is_authenticated()
    }

    /// The session token, used by the host as the connection identifier.
    pub fn connection_id(&self) -> Option<&str> {
        self.client.access_token()
    }

    /// The underlying client, for metadata discovery.
    pub fn client(&self) -> &Vantiq {
        &self.client
    }

    /// Returns the platform control actions that adapters may invoke.
    pub async fn supported_actions(&self) -> Result<Vec<Map<String, Value>>> {
        let body = self
            .client
            .execute(SUPPORTED_ACTIONS_PROCEDURE, &json!({}))
            .await
            .context("Failed to query supported actions")?;
        serde_json::from_value(body).context("Unexpected supported-actions response shape")
    }

    /// Publishes data type records to the configured adapter topic.
    ///
    /// Records are wrapped in an envelope naming the target data type:
    /// `{ "type": <data_type>, "content": <records> }`.
    pub async fn publish_data(
        &self,
        data_type: &str,
        records: &[Map<String, Value>],
    ) -> Result<()> {
        let message = json!({
            "type": data_type,
            "content": records,
        });
        self.publish_topic(&self.config.adapter_topic, &message).await
    }

    /// Publishes a payload to a specific topic.
    pub async fn publish_topic(&self, topic: &str, payload: &Value) -> Result<()> {
        self.client
            .publish(resources::TOPICS, topic, payload)
            .await
            .with_context(|| format!("Failed to publish to topic '{}'", topic))
    }

    /// Queries records of a data type, with optional projection and filter.
    pub async fn select_data(
        &self,
        data_type: &str,
        select_list: Option<&[&str]>,
        where_clause: Option<&Value>,
    ) -> Result<Vec<Value>> {
        self.client
            .select(data_type, select_list, where_clause)
            .await
            .with_context(|| format!("Failed to select from data type '{}'", data_type))
    }
}
