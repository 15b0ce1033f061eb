//! Local dataset provider: fetch, verify, load.

use std::fs;
use std::path::PathBuf;

use bhpt_core::{ModelKind, SurrogateDataset, import_json};

use crate::checksum::verify_file;
use crate::error::{Result, StoreError};
use crate::fetch::download;
use crate::registry::{DatasetEntry, REGISTRY_FILE, Registry};

/// Anything that can materialize a dataset for a model.
pub trait DatasetSource: Send + Sync {
    fn load(&self, model: ModelKind) -> Result<SurrogateDataset>;
}

pub struct DatasetProvider {
    data_dir: PathBuf,
    registry: Registry,
}

impl DatasetProvider {
    pub fn new(data_dir: PathBuf, registry: Registry) -> Self {
        Self { data_dir, registry }
    }

    /// Provider over `data_dir` using its `datasets.toml`, if any.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let registry = Registry::load(&data_dir)?;
        Ok(Self::new(data_dir, registry))
    }

    /// Make sure the dataset file exists locally, downloading it if absent.
    pub fn fetch(&self, model: ModelKind) -> Result<PathBuf> {
        let entry = self.registry.entry(model)?;
        let path = self.data_dir.join(&entry.file_name);
        if path.exists() {
            tracing::debug!("{model} dataset present at {}", path.display());
            return Ok(path);
        }
        tracing::info!("{} not found in {}", entry.file_name, self.data_dir.display());
        let url = entry.url.as_deref().ok_or_else(|| {
            StoreError::Download(format!(
                "{} is missing and no download URL is registered for {model}; add one to {}",
                path.display(),
                self.data_dir.join(REGISTRY_FILE).display()
            ))
        })?;
        download(url, &path)?;
        Ok(path)
    }

    /// Check the local file against the registered content hash.
    pub fn verify(&self, model: ModelKind) -> Result<PathBuf> {
        let entry = self.registry.entry(model)?;
        let path = self.data_dir.join(&entry.file_name);
        if !path.exists() {
            return Err(StoreError::io(
                &path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "dataset file not found"),
            ));
        }
        let expected = self.expected_hash(model, entry)?;
        verify_file(&path, expected, entry.url.as_deref())?;
        tracing::info!("{model} dataset verified");
        Ok(path)
    }

    fn expected_hash<'a>(&self, model: ModelKind, entry: &'a DatasetEntry) -> Result<&'a str> {
        entry.sha256.as_deref().ok_or_else(|| {
            StoreError::Config(format!(
                "no sha256 registered for {model}; add it to {}",
                self.data_dir.join(REGISTRY_FILE).display()
            ))
        })
    }
}

impl DatasetSource for DatasetProvider {
    /// Fetch, verify, parse and check the model tag.
    fn load(&self, model: ModelKind) -> Result<SurrogateDataset> {
        self.fetch(model)?;
        let path = self.verify(model)?;
        let json = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let dataset = import_json(&json)?;
        if dataset.model() != model {
            return Err(StoreError::InvalidData(format!(
                "{} holds a {} dataset, expected {model}",
                path.display(),
                dataset.model()
            )));
        }
        tracing::info!("loaded {model} dataset from {}", path.display());
        Ok(dataset)
    }
}
