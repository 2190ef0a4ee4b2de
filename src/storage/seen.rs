use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of links kept in the dedup file.
pub const SEEN_CAP: usize = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write dedup file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode dedup file: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Links that have already been published, oldest first.
///
/// Membership is exact string equality on the stored link; no URL
/// normalisation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    links: Vec<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.iter().any(|l| l == link)
    }

    /// Adds `link` as the most recent entry and evicts the oldest entries
    /// beyond `cap`. A link that is already present moves to the newest slot.
    pub fn insert(&mut self, link: &str, cap: usize) {
        self.links.retain(|l| l != link);
        self.links.push(link.to_string());
        if self.links.len() > cap {
            let excess = self.links.len() - cap;
            self.links.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Stored links, oldest first.
    pub fn links(&self) -> &[String] {
        &self.links
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Owner of the persisted dedup file.
///
/// The file is a JSON array of link strings. Nothing else in the crate reads
/// or writes it. Reads never fail: a missing, unreadable or corrupt file is
/// treated as an empty set. Writes go through a temp file and a rename so a
/// crash leaves either the old or the new contents on disk.
#[derive(Debug, Clone)]
pub struct DedupStore {
    path: PathBuf,
    cap: usize,
}

impl DedupStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_cap(path, SEEN_CAP)
    }

    pub fn with_cap(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap: cap.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted set, falling back to an empty set on any problem.
    pub fn load(&self) -> SeenSet {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No dedup file yet, starting empty");
                return SeenSet::new();
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read dedup file, treating as empty"
                );
                return SeenSet::new();
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(links) => SeenSet { links },
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Dedup file is corrupt, treating as empty"
                );
                SeenSet::new()
            }
        }
    }

    /// Record a published link and persist the trimmed set.
    ///
    /// Persistence failures are logged and swallowed; the returned set is
    /// still the updated in-memory view.
    pub fn record(&self, link: &str) -> SeenSet {
        let mut seen = self.load();
        seen.insert(link, self.cap);

        if let Err(e) = self.save(&seen) {
            tracing::warn!(link = %link, error = %e, "Failed to persist dedup file");
        }
        seen
    }

    /// Atomically replace the dedup file with `seen`.
    pub fn save(&self, seen: &SeenSet) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&seen.links)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Unpredictable temp name; create_new refuses to follow a pre-planted file.
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = self.path.with_extension(format!("tmp.{:016x}", suffix));

        let result = (|| -> std::io::Result<()> {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            drop(file);

            #[cfg(windows)]
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }

            std::fs::rename(&temp_path, &self.path)
        })();

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            return Err(io_err(e));
        }

        tracing::debug!(path = %self.path.display(), entries = seen.len(), "Dedup file saved");
        Ok(())
    }
}
