use std::path::PathBuf;

use notifier_model::ServerEntry;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::file::ConfigFile;
use super::watcher::watch_config_directory;
use crate::state::AppState;

/// A change to the set of configured broker connections, to be acted on by
/// whatever owns the daemon's client connections.
#[derive(Debug, Clone)]
pub enum ServerDiff {
    Added(ServerEntry),
    Removed(String),
    Changed(ServerEntry),
}

/// Watches the daemon's config file and keeps `AppState.rules` in sync,
/// emitting `ServerDiff`s for anything that should trigger a reconnect.
///
/// Unchanged `(url, secret, name)` entries produce no diff at all, so a
/// reload that only tweaks rules never disturbs an already-connected
/// broker.
pub struct ConfigSupervisor {
    path: PathBuf,
    state: AppState,
    diffs: mpsc::Sender<ServerDiff>,
}

impl ConfigSupervisor {
    pub fn new(path: PathBuf, state: AppState, diffs: mpsc::Sender<ServerDiff>) -> Self {
        Self { path, state, diffs }
    }

    /// Loads the config once and returns the configured servers, without
    /// starting the watch loop. Used at startup before the first connect.
    pub async fn load_initial(&self) -> Vec<ServerEntry> {
        let config = ConfigFile::load(&self.path).await.unwrap_or_default();
        *self.state.rules.write().await = config.rules;
        config.servers
    }

    /// Runs the watch-reload-diff loop forever. Intended to be spawned as a
    /// background task.
    pub async fn run(mut self, mut previous_servers: Vec<ServerEntry>) {
        let directory = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut reload_signal = match watch_config_directory(&directory) {
            Ok((rx, watcher)) => {
                // Keep the watcher alive for the lifetime of this task.
                std::mem::forget(watcher);
                rx
            }
            Err(e) => {
                error!(error = %e, "failed to watch config directory, reload disabled");
                return;
            }
        };

        while reload_signal.recv().await.is_some() {
            let config = match ConfigFile::load(&self.path).await {
                Ok(c) => c,
                Err(e) => {
                    error!(error = %e, "failed to reload config, keeping previous");
                    continue;
                }
            };

            *self.state.rules.write().await = config.rules.clone();

            for diff in diff_servers(&previous_servers, &config.servers) {
                if self.diffs.send(diff).await.is_err() {
                    return;
                }
            }
            previous_servers = config.servers;
            info!("config reloaded");
        }
    }
}

fn diff_servers(previous: &[ServerEntry], current: &[ServerEntry]) -> Vec<ServerDiff> {
    let mut diffs = Vec::new();

    for entry in current {
        match previous.iter().find(|p| p.name == entry.name) {
            None => diffs.push(ServerDiff::Added(entry.clone())),
            Some(old) if old.requires_reconnect(entry) => diffs.push(ServerDiff::Changed(entry.clone())),
            Some(_) => {}
        }
    }
    for old in previous {
        if !current.iter().any(|c| c.name == old.name) {
            diffs.push(ServerDiff::Removed(old.name.clone()));
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, url: &str, secret: &str) -> ServerEntry {
        ServerEntry {
            url: url.into(),
            secret: secret.into(),
            name: name.into(),
        }
    }

    #[test]
    fn unchanged_entries_produce_no_diff() {
        let previous = vec![entry("a", "ws://a", "s")];
        let current = previous.clone();
        assert!(diff_servers(&previous, &current).is_empty());
    }

    #[test]
    fn changed_secret_produces_a_changed_diff() {
        let previous = vec![entry("a", "ws://a", "s")];
        let current = vec![entry("a", "ws://a", "new-secret")];
        let diffs = diff_servers(&previous, &current);
        assert_eq!(diffs.len(), 1);
        assert!(matches!(diffs[0], ServerDiff::Changed(_)));
    }

    #[test]
    fn added_and_removed_are_both_reported() {
        let previous = vec![entry("a", "ws://a", "s")];
        let current = vec![entry("b", "ws://b", "s")];
        let diffs = diff_servers(&previous, &current);
        assert_eq!(diffs.len(), 2);
    }
}
