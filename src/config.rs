//! Engine configuration persistence
//!
//! Stores timing preferences in `~/.config/stencil/config.yaml`

use serde::{Deserialize, Serialize};

/// Engine configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Delay between inserting a reference marker and the first
    /// resynchronization, giving the surface time to mount it (ms)
    #[serde(default = "default_insert_settle_ms")]
    pub insert_settle_ms: u64,
    /// Interval of the safety-net resynchronization sweep (ms)
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

fn default_insert_settle_ms() -> u64 {
    100
}

fn default_sweep_interval_ms() -> u64 {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            insert_settle_ms: default_insert_settle_ms(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

impl EngineConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.insert_settle_ms, 100);
        assert_eq!(config.sweep_interval_ms, 1000);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = serde_yaml::from_str("insert_settle_ms: 250\n").unwrap();
        assert_eq!(config.insert_settle_ms, 250);
        assert_eq!(config.sweep_interval_ms, 1000);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig {
            insert_settle_ms: 50,
            sweep_interval_ms: 2000,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }
}
