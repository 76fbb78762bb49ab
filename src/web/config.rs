use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::geo::Coordinates;
use crate::schedule::Method;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub location: LocationConfig,
    pub web: WebConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub base_folder: PathBuf,
}

/// Default location served when a request carries no geolocation fix.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub method: Method,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Configured fallback coordinate; an unparseable string falls back to
    /// the built-in default rather than failing requests.
    pub fn default_coordinates(&self) -> Coordinates {
        Coordinates::from_coordinates(&self.location.coordinates)
            .unwrap_or(Coordinates::FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let config: Config = serde_yaml::from_str(
            r#"
location:
  name: Jakarta
  coordinates: "-6.2088, 106.8456"
web: {}
store:
  base_folder: /var/lib/salat-o-mat
"#,
        )
        .unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.location.method, Method::MoonsightingCommittee);
        assert_eq!(config.default_coordinates().latitude_deg, -6.2088);
    }

    #[test]
    fn bad_coordinates_fall_back() {
        let config: Config = serde_yaml::from_str(
            r#"
location:
  coordinates: "nowhere"
web: {}
store:
  base_folder: /tmp/x
"#,
        )
        .unwrap();
        assert_eq!(config.default_coordinates(), Coordinates::FALLBACK);
    }
}
