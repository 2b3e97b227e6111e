use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::{engine_debug, engine_info};
use life_core::{FavoritesStore, Pattern, StoreError};

use crate::persist::{AtomicFileWriter, PersistError};

/// Favorites kept as a JSON array of names in a single file.
pub struct JsonFavoritesStore {
    writer: AtomicFileWriter,
    defaults: Vec<String>,
}

impl JsonFavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_defaults(path, Pattern::default_favorite_names())
    }

    pub fn with_defaults(path: impl Into<PathBuf>, defaults: Vec<String>) -> Self {
        Self {
            writer: AtomicFileWriter::new(path),
            defaults,
        }
    }

    pub fn path(&self) -> &Path {
        self.writer.target()
    }
}

impl FavoritesStore for JsonFavoritesStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        let text = match fs::read_to_string(self.path()) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                engine_info!("no favorites at {:?}, using defaults", self.path());
                return Ok(self.defaults.clone());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };
        let names: Vec<String> =
            serde_json::from_str(&text).map_err(|e| StoreError::Malformed(e.to_string()))?;
        engine_debug!("loaded {} favorites from {:?}", names.len(), self.path());
        Ok(names)
    }

    fn save(&self, names: &[String]) -> Result<(), StoreError> {
        let json =
            serde_json::to_vec_pretty(names).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.writer.write(&json).map_err(|err| match err {
            PersistError::Io(err) | PersistError::Directory { source: err, .. } => {
                StoreError::Io(err)
            }
        })?;
        engine_debug!("saved {} favorites to {:?}", names.len(), self.path());
        Ok(())
    }
}
