//! Known datasets and where to find them.
//!
//! Built-in entries only name the file. The download URL and content hash
//! for a released dataset come from `datasets.toml` in the data directory:
//!
//! ```toml
//! [BHPTNRSur1dq1e4]
//! url = "https://example.org/BHPTNRSur1dq1e4.json"
//! sha256 = "9f2c..."
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use bhpt_core::ModelKind;

use crate::error::{Result, StoreError};

pub const REGISTRY_FILE: &str = "datasets.toml";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetEntry {
    pub file_name: String,
    /// Lowercase hex SHA-256 of the file.
    pub sha256: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntryOverride {
    file_name: Option<String>,
    sha256: Option<String>,
    url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<ModelKind, DatasetEntry>,
}

impl Registry {
    pub fn builtin() -> Self {
        let entries = ModelKind::ALL
            .iter()
            .map(|model| {
                (
                    *model,
                    DatasetEntry {
                        file_name: format!("{}.json", model.name()),
                        sha256: None,
                        url: None,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Built-in entries overlaid with `datasets.toml` from `data_dir`, if present.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(REGISTRY_FILE);
        let mut registry = Self::builtin();
        if !path.exists() {
            return Ok(registry);
        }
        let content = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        registry.apply_overrides(&content)?;
        tracing::debug!("loaded dataset registry overrides from {}", path.display());
        Ok(registry)
    }

    /// Apply overrides given as TOML text.
    pub fn apply_overrides(&mut self, content: &str) -> Result<()> {
        let table: BTreeMap<String, EntryOverride> = toml::from_str(content)
            .map_err(|e| StoreError::Config(format!("{REGISTRY_FILE}: {e}")))?;
        for (name, patch) in table {
            let model: ModelKind = name
                .parse()
                .map_err(|e| StoreError::Config(format!("{REGISTRY_FILE}: {e}")))?;
            let entry = self.entries.entry(model).or_insert_with(|| DatasetEntry {
                file_name: format!("{}.json", model.name()),
                sha256: None,
                url: None,
            });
            if let Some(file_name) = patch.file_name {
                entry.file_name = file_name;
            }
            if let Some(sha256) = patch.sha256 {
                entry.sha256 = Some(sha256.trim().to_ascii_lowercase());
            }
            if patch.url.is_some() {
                entry.url = patch.url;
            }
        }
        Ok(())
    }

    pub fn entry(&self, model: ModelKind) -> Result<&DatasetEntry> {
        self.entries
            .get(&model)
            .ok_or_else(|| StoreError::Config(format!("no registry entry for {model}")))
    }
}
