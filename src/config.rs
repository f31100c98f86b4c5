//! Configuration handling for the TUI
//!
//! Delivery identifiers are mandatory: there are no baked-in fallbacks,
//! and startup fails with a clear message when any of them is missing.

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variables overriding the config file
pub const ENV_SERVICE_ID: &str = "DEMO_TUI_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "DEMO_TUI_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "DEMO_TUI_PUBLIC_KEY";

/// Identifiers for the hosted email-delivery service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// On-disk config file shape; every field optional so the environment
/// can fill the gaps
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

impl ConfigFile {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "demoreq", "demo-request-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the config file if one exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ConfigFile = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save the config file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

impl DeliveryConfig {
    /// Resolve delivery identifiers from the environment, falling back to
    /// the config file. Fails when any identifier is left unset.
    pub fn load() -> Result<Self> {
        let file = ConfigFile::load()?;
        Self::resolve(&file, &|name| std::env::var(name).ok())
    }

    /// Pure resolution step, split out so tests can drive the sources
    pub fn resolve(file: &ConfigFile, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let service_id = env(ENV_SERVICE_ID).or_else(|| file.service_id.clone());
        let template_id = env(ENV_TEMPLATE_ID).or_else(|| file.template_id.clone());
        let public_key = env(ENV_PUBLIC_KEY).or_else(|| file.public_key.clone());

        let mut missing = Vec::new();
        if service_id.is_none() {
            missing.push(ENV_SERVICE_ID);
        }
        if template_id.is_none() {
            missing.push(ENV_TEMPLATE_ID);
        }
        if public_key.is_none() {
            missing.push(ENV_PUBLIC_KEY);
        }
        if !missing.is_empty() {
            bail!(
                "delivery configuration incomplete; set {} (or add the matching \
                 fields to the config file)",
                missing.join(", ")
            );
        }

        Ok(Self {
            service_id: service_id.unwrap_or_default(),
            template_id: template_id.unwrap_or_default(),
            public_key: public_key.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_from_file_only() {
        let file = ConfigFile {
            service_id: Some("service_abc".to_string()),
            template_id: Some("template_xyz".to_string()),
            public_key: Some("pk_123".to_string()),
        };

        let config = DeliveryConfig::resolve(&file, &no_env).unwrap();
        assert_eq!(config.service_id, "service_abc");
        assert_eq!(config.template_id, "template_xyz");
        assert_eq!(config.public_key, "pk_123");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = ConfigFile {
            service_id: Some("from_file".to_string()),
            template_id: Some("template_xyz".to_string()),
            public_key: Some("pk_123".to_string()),
        };
        let env = |name: &str| (name == ENV_SERVICE_ID).then(|| "from_env".to_string());

        let config = DeliveryConfig::resolve(&file, &env).unwrap();
        assert_eq!(config.service_id, "from_env");
        assert_eq!(config.template_id, "template_xyz");
    }

    #[test]
    fn test_missing_identifiers_fail_startup() {
        let file = ConfigFile {
            service_id: Some("service_abc".to_string()),
            ..Default::default()
        };

        let err = DeliveryConfig::resolve(&file, &no_env).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(ENV_TEMPLATE_ID));
        assert!(msg.contains(ENV_PUBLIC_KEY));
        assert!(!msg.contains(&format!("{ENV_SERVICE_ID},")));
    }

    #[test]
    fn test_all_missing_lists_everything() {
        let err = DeliveryConfig::resolve(&ConfigFile::default(), &no_env).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(ENV_SERVICE_ID));
        assert!(msg.contains(ENV_TEMPLATE_ID));
        assert!(msg.contains(ENV_PUBLIC_KEY));
    }

    #[test]
    fn test_config_file_deserialize_from_empty_json() {
        let parsed: ConfigFile = serde_json::from_str("{}").unwrap();
        assert!(parsed.service_id.is_none());
        assert!(parsed.template_id.is_none());
        assert!(parsed.public_key.is_none());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let file = ConfigFile {
            service_id: Some("service_abc".to_string()),
            template_id: None,
            public_key: Some("pk_123".to_string()),
        };
        let json = serde_json::to_string(&file).unwrap();
        let parsed: ConfigFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.service_id, Some("service_abc".to_string()));
        assert!(parsed.template_id.is_none());
    }
}
