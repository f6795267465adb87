use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk layout under the configured data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory (./data by default).
    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    /// Key-value snapshots (./data/store).
    pub fn store_dir(&self) -> PathBuf {
        self.root.join("store")
    }

    /// Creates the directory tree if it does not exist yet.
    pub fn init(&self) -> Result<(), std::io::Error> {
        let store_path = self.store_dir();

        if !store_path.exists() {
            info!("Creating store directory: {:?}", store_path);
            fs::create_dir_all(&store_path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_store_dir() {
        let temp = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(temp.path().join("data"));

        assert!(!paths.store_dir().exists());
        paths.init().unwrap();
        assert!(paths.store_dir().is_dir());
        // second call is a no-op
        paths.init().unwrap();
    }
}
