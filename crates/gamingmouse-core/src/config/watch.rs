// GamingMouse Config Watch - File Watcher
// Reports debounced changes to the configuration file through notify

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use notify::{DebouncedEvent, RecommendedWatcher, RecursiveMode, Watcher};

/// Default quiet period before a change is reported
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Errors setting up a configuration watch
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error(transparent)]
    Notify(#[from] notify::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a file path: {0}")]
    InvalidPath(PathBuf),
}

/// Whether a debounced event means `path` now has new contents.
///
/// Renames onto the path count, so atomic-save editors are picked up.
/// Removal does not: the previous configuration stays in effect.
pub fn is_config_change(event: &DebouncedEvent, path: &Path) -> bool {
    match event {
        DebouncedEvent::Create(p) | DebouncedEvent::Write(p) | DebouncedEvent::Chmod(p) => {
            p == path
        }
        DebouncedEvent::Rename(_, to) => to == path,
        DebouncedEvent::Rescan => true,
        _ => false,
    }
}

/// Watches one configuration file.
///
/// The parent directory is watched so the file may be replaced or created
/// after the watch starts.
pub struct ConfigWatcher {
    path: PathBuf,
    receiver: Receiver<DebouncedEvent>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(path: impl AsRef<Path>, delay: Duration) -> Result<Self, WatchError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| WatchError::InvalidPath(path.to_path_buf()))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = dir.canonicalize()?;

        let (sender, receiver) = channel();
        let mut watcher = notify::watcher(sender, delay)?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let path = dir.join(file_name);
        log::debug!("Watching {} (debounce {:?})", path.display(), delay);
        Ok(Self {
            path,
            receiver,
            _watcher: watcher,
        })
    }

    /// Absolute path of the watched file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events without blocking. True if the file changed.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.receiver.try_recv() {
            changed |= self.accept(&event);
        }
        changed
    }

    /// Block up to `timeout` for a change to the file
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(event) if self.accept(&event) => return true,
                Ok(_) => continue,
                Err(_) => return false,
            }
        }
    }

    fn accept(&self, event: &DebouncedEvent) -> bool {
        if let DebouncedEvent::Error(err, path) = event {
            log::warn!("Configuration watch error ({:?}): {}", path, err);
            return false;
        }
        let changed = is_config_change(event, &self.path);
        if changed {
            log::debug!("Configuration file changed: {:?}", event);
        }
        changed
    }
}
