use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, VantiqError};

/// Resource names defined by the Vantiq system.
pub mod resources {
    pub const TYPES: &str = "types";
    pub const TOPICS: &str = "topics";
    pub const SOURCES: &str = "sources";
    pub const PROCEDURES: &str = "procedures";
    pub const RULES: &str = "rules";
}

/// Resources addressed as `resources/{name}`. Everything else is a
/// user-defined data type addressed as `resources/custom/{name}`.
const SYSTEM_RESOURCES: &[&str] = &[
    resources::TYPES,
    resources::TOPICS,
    resources::SOURCES,
    resources::PROCEDURES,
    resources::RULES,
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// HTTP client for the Vantiq REST API.
///
/// `authenticate` exchanges username/password (HTTP Basic) for an access
/// token; subsequent calls send the token as a Bearer header. The client
/// holds no other state, so it can be shared freely behind `&self` once
/// authenticated.
pub struct Vantiq {
    server: String,
    api_version: u32,
    http_client: reqwest::Client,
    access_token: Option<String>,
}

impl Vantiq {
    /// Create a client with the default request timeout.
    pub fn new(server: impl Into<String>, api_version: u32) -> Self {
        Self::with_timeout(server, api_version, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(server: impl Into<String>, api_version: u32, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent("vantiq-connector/1.0")
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            server: server.into().trim_end_matches('/').to_string(),
            api_version,
            http_client,
            access_token: None,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v{}/{}", self.server, self.api_version, path)
    }

    fn resource_path(resource: &str) -> String {
        if SYSTEM_RESOURCES.contains(&resource) {
            format!("resources/{}", resource)
        } else {
            format!("resources/custom/{}", resource)
        }
    }

    fn token(&self) -> Result<&str, VantiqError> {
        self.access_token
            .as_deref()
            .ok_or(VantiqError::NotAuthenticated)
    }

    /// Authenticate with username/password and store the session token.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<(), VantiqError> {
        let url = self.api_url("authenticate");
        let response = self
            .http_client
            .get(&url)
            .basic_auth(username, Some(password))
            .send()
            .await?;

        let response = check_response(response).await?;
        let auth: AuthResponse = response.json().await?;
        self.access_token = Some(auth.access_token);
        debug!(server = %self.server, "Authenticated with Vantiq");
        Ok(())
    }

    /// Whether a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The current session token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Install an access token issued out of band instead of authenticating.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    /// Drop the current session token.
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    /// Select records of a resource, with optional property projection and
    /// filter. Both are passed as JSON-encoded query parameters.
    pub async fn select(
        &self,
        resource: &str,
        props: Option<&[&str]>,
        where_clause: Option<&Value>,
    ) -> Result<Vec<Value>, VantiqError> {
        let token = self.token()?;
        let url = self.api_url(&Self::resource_path(resource));
        let mut request = self.http_client.get(&url).bearer_auth(token);
        if let Some(props) = props {
            let encoded = serde_json::to_string(props).expect("props encode as JSON");
            request = request.query(&[("props", encoded)]);
        }
        if let Some(where_clause) = where_clause {
            let encoded = serde_json::to_string(where_clause).expect("where clause encode as JSON");
            request = request.query(&[("where", encoded)]);
        }

        let response = check_response(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Select a single record of a resource by its identifier.
    pub async fn select_one(&self, resource: &str, id: &str) -> Result<Value, VantiqError> {
        let token = self.token()?;
        let url = self.api_url(&format!("{}/{}", Self::resource_path(resource), id));
        let response = check_response(
            self.http_client.get(&url).bearer_auth(token).send().await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    /// Insert a record into a resource. Returns the stored record.
    pub async fn insert(&self, resource: &str, record: &Value) -> Result<Value, VantiqError> {
        let token = self.token()?;
        let url = self.api_url(&Self::resource_path(resource));
        let response = check_response(
            self.http_client
                .post(&url)
                .bearer_auth(token)
                .json(record)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }

    /// Publish a payload to a topic or source. The server acknowledges a
    /// successful publish with an empty 200 response.
    pub async fn publish(
        &self,
        resource: &str,
        id: &str,
        payload: &Value,
    ) -> Result<(), VantiqError> {
        let token = self.token()?;
        let url = self.api_url(&format!(
            "{}/{}",
            Self::resource_path(resource),
            id.trim_start_matches('/')
        ));
        check_response(
            self.http_client
                .post(&url)
                .bearer_auth(token)
                .json(payload)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// Execute a named procedure with the given parameters and return its
    /// result.
    pub async fn execute(&self, procedure: &str, params: &Value) -> Result<Value, VantiqError> {
        let token = self.token()?;
        let url = self.api_url(&format!("resources/{}/{}", resources::PROCEDURES, procedure));
        let response = check_response(
            self.http_client
                .post(&url)
                .bearer_auth(token)
                .json(params)
                .send()
                .await?,
        )
        .await?;
        Ok(response.json().await?)
    }
}

/// Map a non-2xx response to a [`VantiqError::Server`], parsing any error
/// records the server put in the body.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, VantiqError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VantiqError::Server {
        status: status.as_u16(),
        errors: parse_error_body(&body),
    })
}

/// The server reports errors as a JSON array of records, a single record, or
/// no body at all.
fn parse_error_body(body: &str) -> Vec<ApiError> {
    if let Ok(errors) = serde_json::from_str::<Vec<ApiError>>(body) {
        return errors;
    }
    if let Ok(error) = serde_json::from_str::<ApiError>(body) {
        return vec![error];
    }
    Vec::new()
}
