//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for node logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to logs
    pub service_name: String,

    /// Oracle index of this node
    pub node_id: u8,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Network identifier (testnet, mainnet, devnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ccip-commit".to_string(),
            node_id: 0,
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "testnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: ccip-commit)
    /// - `CCIP_NODE_ID`: Oracle index (default: 0)
    /// - `CCIP_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `CCIP_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `CCIP_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    /// - `CCIP_NETWORK`: Network name (default: testnet)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "ccip-commit".to_string()),

            node_id: env::var("CCIP_NODE_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),

            log_level: env::var("CCIP_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("CCIP_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("CCIP_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: env::var("CCIP_NETWORK").unwrap_or_else(|_| "testnet".to_string()),
        }
    }

    /// Configuration for a specific oracle node.
    pub fn for_node(node_id: u8) -> Self {
        let mut config = Self::from_env();
        config.node_id = node_id;
        config
    }

    /// Service name including the node index.
    pub fn full_service_name(&self) -> String {
        format!("{}-node-{}", self.service_name, self.node_id)
    }
}
