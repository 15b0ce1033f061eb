//! Content-hash integrity check.

use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, StoreError};

/// Lowercase hex SHA-256 of the file at `path`.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| StoreError::io(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn sha256_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Fail with [`StoreError::ChecksumMismatch`] unless `path` hashes to `expected`.
pub fn verify_file(path: &Path, expected: &str, url: Option<&str>) -> Result<()> {
    let actual = sha256_file(path)?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        tracing::warn!("checksum mismatch for {}", path.display());
        Err(StoreError::ChecksumMismatch {
            file: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
            url: url.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, b"abc").unwrap();
        let good = sha256_bytes(b"abc");
        verify_file(&path, &good, None).unwrap();
        verify_file(&path, &good.to_uppercase(), None).unwrap();

        let err = verify_file(&path, "00", Some("https://example.org/data.json")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("out of date or corrupted"));
        assert!(msg.contains("https://example.org/data.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_file(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
