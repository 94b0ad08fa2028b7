//! File catalogs.
//!
//! Each format has a JSON catalog (`las-list.json`, `segy-list.json`) produced offline, listing
//! the available files with precomputed metadata. Entries are keyed by their `name` field and are
//! passed through to clients unchanged.

use crate::error::DecimatorError;
use crate::models::{CatalogEntry, FileFormat};

use std::path::{Path, PathBuf};

/// Read-only view of the catalog and data files of one format.
#[derive(Clone, Debug)]
pub struct Catalog {
    format: FileFormat,
    data_dir: PathBuf,
}

impl Catalog {
    /// Return a new Catalog.
    ///
    /// # Arguments
    ///
    /// * `format`: File format described by the catalog
    /// * `data_dir`: Directory holding the catalog file and the per-format data directory
    pub fn new(format: FileFormat, data_dir: impl AsRef<Path>) -> Self {
        Self {
            format,
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(self.format.catalog_file())
    }

    /// Directory holding the catalogued files.
    pub fn files_dir(&self) -> PathBuf {
        self.data_dir.join(self.format.data_dir())
    }

    /// Return all catalog entries, in catalog order.
    #[tracing::instrument(level = "DEBUG", skip(self), fields(format = %self.format))]
    pub async fn list(&self) -> Result<Vec<CatalogEntry>, DecimatorError> {
        let path = self.path();
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DecimatorError::CatalogMissing {
                    format: self.format,
                    path,
                })
            }
            Err(source) => {
                return Err(DecimatorError::CatalogRead {
                    format: self.format,
                    source,
                })
            }
        };
        serde_json::from_str(&contents).map_err(|source| DecimatorError::CatalogParse {
            format: self.format,
            source,
        })
    }

    /// Return the entry whose name is exactly `filename`.
    pub async fn lookup(&self, filename: &str) -> Result<CatalogEntry, DecimatorError> {
        self.list()
            .await?
            .into_iter()
            .find(|entry| entry.get("name").and_then(|name| name.as_str()) == Some(filename))
            .ok_or_else(|| DecimatorError::NotInCatalog {
                format: self.format,
                filename: filename.to_string(),
            })
    }

    /// Return the path of a catalogued file, checking that it exists on disk.
    pub async fn file_path(&self, filename: &str) -> Result<PathBuf, DecimatorError> {
        let dir = self.files_dir();
        let path = dir.join(filename);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(path),
            _ => Err(DecimatorError::FileMissing {
                format: self.format,
                filename: filename.to_string(),
                dir,
            }),
        }
    }
}
