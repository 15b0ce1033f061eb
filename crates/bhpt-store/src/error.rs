use std::fmt;
use std::path::PathBuf;

use bhpt_core::SurrogateError;

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Download(String),
    ChecksumMismatch {
        file: PathBuf,
        expected: String,
        actual: String,
        url: Option<String>,
    },
    InvalidData(String),
    Config(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            StoreError::Download(msg) => write!(f, "download failed: {msg}"),
            StoreError::ChecksumMismatch {
                file,
                expected,
                actual,
                url,
            } => {
                write!(
                    f,
                    "{} is out of date or corrupted (sha256 {actual}, expected {expected})",
                    file.display()
                )?;
                if let Some(url) = url {
                    write!(f, "; download a fresh copy from {url}")?;
                }
                Ok(())
            }
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            StoreError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SurrogateError> for StoreError {
    fn from(e: SurrogateError) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
