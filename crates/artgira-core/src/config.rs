//! Bridge configuration
//!
//! The configuration is a single JSON document. Unknown keys are rejected so
//! that a typo in `auto_on_off` or `sub_uni` does not silently fall back to a
//! default.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::{error::CoreError, Result};

/// Top-level bridge configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the automation server, e.g. `https://192.168.1.10`
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub ignore_ssl: bool,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Sent as `token` query parameter with every request
    #[serde(default)]
    pub token: String,
    pub artnet: ArtNetConfig,
    /// Function allow-list; empty means every function is considered
    #[serde(default)]
    pub uids: Vec<String>,
    #[serde(default)]
    pub auto_on_off: bool,
    #[serde(default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,
    #[serde(default = "default_push_timeout_ms")]
    pub push_timeout_ms: u64,
}

/// Art-Net side of the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtNetConfig {
    /// IPv4 CIDR selecting the local interface, e.g. `2.0.0.0/8`
    pub network: String,
    #[serde(default)]
    pub net: u8,
    #[serde(default)]
    pub sub_uni: u8,
}

fn default_sync_interval_ms() -> u64 {
    1000
}

fn default_push_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Parse a configuration from a reader
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Parse a configuration from a file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::load(std::io::BufReader::new(file))
    }

    /// Check the values serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.artnet.network.trim().is_empty() {
            return Err(CoreError::InvalidConfig("missing artnet config".to_string()));
        }
        if self.artnet.net > 127 {
            return Err(CoreError::InvalidConfig(format!(
                "Art-Net net {} out of range (0-127)",
                self.artnet.net
            )));
        }
        if self.sync_interval_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "sync_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.push_timeout_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "push_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_millis(self.push_timeout_ms)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("ignore_ssl", &self.ignore_ssl)
            .field("client_id", &self.client_id)
            .field("user", &self.user)
            .field("password", &"***REDACTED***")
            .field("token", &"***REDACTED***")
            .field("artnet", &self.artnet)
            .field("uids", &self.uids)
            .field("auto_on_off", &self.auto_on_off)
            .field("sync_interval_ms", &self.sync_interval_ms)
            .field("push_timeout_ms", &self.push_timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{ "artnet": { "network": "2.0.0.0/8", "net": 0, "sub_uni": 1 } }"#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::load(MINIMAL.as_bytes()).unwrap();
        assert_eq!(config.artnet.network, "2.0.0.0/8");
        assert_eq!(config.artnet.sub_uni, 1);
        assert!(!config.auto_on_off);
        assert!(config.uids.is_empty());
        assert_eq!(config.sync_interval(), Duration::from_secs(1));
        assert_eq!(config.push_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{ "artnet": { "network": "2.0.0.0/8" }, "auto_onoff": true }"#;
        assert!(matches!(
            Config::load(json.as_bytes()),
            Err(CoreError::JsonError(_))
        ));
    }

    #[test]
    fn test_missing_network_is_invalid() {
        let json = r#"{ "artnet": { "network": "" } }"#;
        let config = Config::load(json.as_bytes()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_net_out_of_range_is_invalid() {
        let json = r#"{ "artnet": { "network": "10.0.0.0/8", "net": 200 } }"#;
        let config = Config::load(json.as_bytes()).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "server": "https://gira.local", "token": "secret_token", "auto_on_off": true,
                "artnet": {{ "network": "192.168.0.0/24", "net": 1, "sub_uni": 2 }},
                "uids": ["a001"] }}"#
        )
        .unwrap();

        let config = Config::load_file(file.path()).unwrap();
        assert_eq!(config.server, "https://gira.local");
        assert!(config.auto_on_off);
        assert_eq!(config.artnet.net, 1);
        assert_eq!(config.uids, vec!["a001".to_string()]);
    }

    #[test]
    fn test_debug_redaction() {
        let mut config = Config::load(MINIMAL.as_bytes()).unwrap();
        config.password = "hunter2".to_string();
        config.token = "secret_token".to_string();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("hunter2"));
        assert!(!debug_str.contains("secret_token"));
        assert!(debug_str.contains("2.0.0.0/8"));
    }
}
