//! Dataset provider for the bhpt-core surrogates.
//!
//! Resolves the local data directory, downloads missing dataset files,
//! checks their SHA-256 against the registry, parses them into
//! [`bhpt_core::SurrogateDataset`] and caches one per model for the process.

pub mod cache;
pub mod checksum;
pub mod error;
pub mod fetch;
pub mod paths;
pub mod provider;
pub mod registry;

pub use cache::DatasetCache;
pub use checksum::{sha256_bytes, sha256_file, verify_file};
pub use error::{Result, StoreError};
pub use paths::{DATA_DIR_ENV, default_base_dir, resolve_data_dir};
pub use provider::{DatasetProvider, DatasetSource};
pub use registry::{DatasetEntry, REGISTRY_FILE, Registry};
