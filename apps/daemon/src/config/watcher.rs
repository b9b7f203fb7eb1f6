use std::path::Path;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Debounce window: multiple filesystem events for one logical save (write,
/// then rename, then metadata touch) collapse into a single reload.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the directory containing the config file (not the file's inode,
/// since editors commonly replace a file rather than write it in place) and
/// yields a debounced `()` each time it settles after a burst of events.
pub fn watch_config_directory(directory: &Path) -> Result<(mpsc::Receiver<()>, RecommendedWatcher), notify::Error> {
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| match event {
        Ok(_) => {
            let _ = raw_tx.send(());
        }
        Err(e) => error!(error = %e, "config directory watch error"),
    })?;
    watcher.watch(directory, RecursiveMode::NonRecursive)?;

    let (debounced_tx, debounced_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        loop {
            if raw_rx.recv().await.is_none() {
                break;
            }
            // drain any further events already queued within the debounce window
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(DEBOUNCE) => break,
                    more = raw_rx.recv() => {
                        if more.is_none() {
                            return;
                        }
                    }
                }
            }
            if debounced_tx.send(()).await.is_err() {
                warn!("config supervisor dropped a debounced reload, receiver gone");
                break;
            }
        }
    });

    Ok((debounced_rx, watcher))
}
