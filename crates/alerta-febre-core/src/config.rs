//! Client settings.
//!
//! Sources, lowest precedence first: compiled defaults, an optional TOML
//! file, then `ALERTA_FEBRE__*` environment variables
//! (e.g. `ALERTA_FEBRE__API__BASE_URL`).

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::intake::IntakePolicy;
use crate::store::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use alerta_febre_geo::{DEFAULT_GEOCODER_TIMEOUT, DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT};

/// Default settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "alerta-febre.toml";
pub const ENV_PREFIX: &str = "ALERTA_FEBRE";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub intake: IntakePolicy,
    pub log_level: String,
}

/// Remote registry connection.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reverse geocoding service.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeocoderSettings {
    pub enabled: bool,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl GeocoderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_API_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            },
            geocoder: GeocoderSettings {
                enabled: true,
                base_url: DEFAULT_NOMINATIM_URL.to_string(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                timeout_secs: DEFAULT_GEOCODER_TIMEOUT.as_secs(),
            },
            intake: IntakePolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Load settings from `alerta-febre.toml` in the working directory (if
/// present) and the environment.
pub fn get_config() -> Result<Settings, ConfigError> {
    load_config(Path::new(CONFIG_FILE))
}

/// Load settings from the given file (if present) and the environment.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    build_config(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn build_config(path: &Path, env: Environment) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();

    Config::builder()
        .set_default("api.base_url", defaults.api.base_url)?
        .set_default("api.timeout_secs", defaults.api.timeout_secs)?
        .set_default("geocoder.enabled", defaults.geocoder.enabled)?
        .set_default("geocoder.base_url", defaults.geocoder.base_url)?
        .set_default("geocoder.user_agent", defaults.geocoder.user_agent)?
        .set_default("geocoder.timeout_secs", defaults.geocoder.timeout_secs)?
        .set_default(
            "intake.require_medication_details",
            defaults.intake.require_medication_details,
        )?
        .set_default("log_level", defaults.log_level)?
        .add_source(File::from(path).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = build_config(&dir.path().join("missing.toml"), env_from(&[])).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api.timeout(), Duration::from_secs(10));
        assert!(!settings.intake.require_medication_details);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerta-febre.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[api]
base_url = "http://10.0.0.5:3000"
timeout_secs = 3

[geocoder]
enabled = false

[intake]
require_medication_details = true
"#
        )
        .unwrap();

        let settings = build_config(&path, env_from(&[])).unwrap();
        assert_eq!(settings.api.base_url, "http://10.0.0.5:3000");
        assert_eq!(settings.api.timeout(), Duration::from_secs(3));
        assert!(!settings.geocoder.enabled);
        assert_eq!(settings.geocoder.base_url, DEFAULT_NOMINATIM_URL);
        assert!(settings.intake.require_medication_details);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerta-febre.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://from-file:3000\"\n").unwrap();

        let env = env_from(&[
            ("ALERTA_FEBRE__API__BASE_URL", "http://from-env:3000"),
            ("ALERTA_FEBRE__GEOCODER__TIMEOUT_SECS", "4"),
        ]);
        let settings = build_config(&path, env).unwrap();

        assert_eq!(settings.api.base_url, "http://from-env:3000");
        assert_eq!(settings.geocoder.timeout(), Duration::from_secs(4));
    }
}
