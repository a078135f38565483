use serde::Deserialize;

/// Connector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorConfig {
    /// Vantiq server base URL
    #[serde(default = "default_server")]
    pub server: String,
    /// REST API version
    #[serde(default = "default_api_version")]
    pub api_version: u32,
    /// Topic that receives adapter-published data type records
    #[serde(default = "default_adapter_topic")]
    pub adapter_topic: String,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_server() -> String {
    "https://dev.vantiq.com".to_string()
}

fn default_api_version() -> u32 {
    1
}

fn default_adapter_topic() -> String {
    "/system/adapter/inbound".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            api_version: default_api_version(),
            adapter_topic: default_adapter_topic(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<ConnectorConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: ConnectorConfig = toml::from_str(&contents)?;
    Ok(config)
}
