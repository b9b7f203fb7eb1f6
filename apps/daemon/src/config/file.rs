use std::path::Path;

use notifier_model::{RulesConfig, ServerEntry};
use serde::{Deserialize, Serialize};

use crate::error::DaemonError;

/// The daemon's on-disk configuration: which brokers to connect to, and the
/// rules applied to incoming notifications.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl ConfigFile {
    pub async fn load(path: &Path) -> Result<Self, DaemonError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| DaemonError::Config(format!("malformed config at {}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(DaemonError::Config(format!("failed to read config at {}: {e}", path.display()))),
        }
    }

    /// Persists the config, restricting permissions to the owner on unix
    /// platforms since it carries broker shared secrets.
    pub async fn save(&self, path: &Path) -> Result<(), DaemonError> {
        let serialized = serde_json::to_vec_pretty(self)
            .map_err(|e| DaemonError::Config(format!("failed to serialize config: {e}")))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DaemonError::Config(format!("failed to create config directory: {e}")))?;
        }
        tokio::fs::write(path, serialized)
            .await
            .map_err(|e| DaemonError::Config(format!("failed to write config at {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(path, permissions)
                .await
                .map_err(|e| DaemonError::Config(format!("failed to set config permissions: {e}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join("config.json")).await.unwrap();
        assert!(config.servers.is_empty());
    }

    #[tokio::test]
    async fn round_trips_through_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ConfigFile::default();
        config.servers.push(ServerEntry {
            url: "ws://example".into(),
            secret: "s3cr3t".into(),
            name: "desk".into(),
        });
        config.save(&path).await.unwrap();

        let reloaded = ConfigFile::load(&path).await.unwrap();
        assert_eq!(reloaded.servers, config.servers);
    }
}
