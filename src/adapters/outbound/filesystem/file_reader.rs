use crate::inventory::domain::{CatalogPage, PageRequest, SoftwareRecord};
use crate::ports::outbound::CatalogRepository;
use crate::shared::error::SoftkeeperError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// JsonFileCatalog adapter for a catalog exported to disk
///
/// This adapter implements the CatalogRepository port over a JSON array of
/// software records (the format written by `softkeeper export`, or the
/// PascalCase one saved by the desktop client). Paging and
/// search, which the catalog service performs server-side, are applied
/// locally. The file is re-read on every call.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Safely read the catalog file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn load(&self) -> Result<Vec<SoftwareRecord>> {
        validate_regular_file(&self.path, "catalog file").map_err(|e| {
            SoftkeeperError::FileReadError {
                path: self.path.clone(),
                details: e.to_string(),
            }
        })?;

        let metadata = fs::metadata(&self.path).map_err(|e| SoftkeeperError::FileReadError {
            path: self.path.clone(),
            details: e.to_string(),
        })?;
        validate_file_size(metadata.len(), &self.path, MAX_FILE_SIZE)?;

        let content =
            fs::read_to_string(&self.path).map_err(|e| SoftkeeperError::FileReadError {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        let records: Vec<SoftwareRecord> =
            serde_json::from_str(&content).map_err(|e| SoftkeeperError::CatalogParse {
                source_name: self.path.display().to_string(),
                details: e.to_string(),
            })?;

        Ok(records
            .into_iter()
            .filter(|record| !record.name.trim().is_empty())
            .collect())
    }
}

#[async_trait]
impl CatalogRepository for JsonFileCatalog {
    async fn fetch_all(&self) -> Result<Vec<SoftwareRecord>> {
        self.load()
    }

    async fn fetch_page(&self, request: PageRequest) -> Result<CatalogPage> {
        let records = self.load()?;
        Ok(CatalogPage::from_listing(&records, request))
    }

    async fn search_remote(&self, keyword: &str) -> Result<Vec<SoftwareRecord>> {
        let needle = keyword.trim().to_lowercase();
        let records = self.load()?;
        if needle.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| {
                record.name.to_lowercase().contains(&needle)
                    || record.description_str().to_lowercase().contains(&needle)
            })
            .collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
