//! Dataset download.

use std::fs;
use std::io::Write;
use std::path::Path;

use reqwest::blocking::Client;

use crate::error::{Result, StoreError};

/// Download `url` to `dest`. A failed transfer leaves no partial dataset behind.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    tracing::info!("downloading {url}");
    let response = Client::new()
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| StoreError::Download(format!("{url}: {e}")))?;
    let bytes = response
        .bytes()
        .map_err(|e| StoreError::Download(format!("{url}: {e}")))?;

    write_atomically(dest, &bytes)?;

    tracing::info!("saved {} bytes to {}", bytes.len(), dest.display());
    Ok(())
}

/// Write `bytes` to `dest` through a `.part` sibling, removed again on failure.
fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let tmp = dest.with_extension("part");
    let written = write_part(&tmp, bytes)
        .and_then(|()| fs::rename(&tmp, dest).map_err(|e| StoreError::io(dest, e)));
    if written.is_err()
        && tmp.exists()
        && let Err(e) = fs::remove_file(&tmp)
    {
        tracing::warn!("could not remove {}: {e}", tmp.display());
    }
    written
}

fn write_part(tmp: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = fs::File::create(tmp).map_err(|e| StoreError::io(tmp, e))?;
    file.write_all(bytes).map_err(|e| StoreError::io(tmp, e))?;
    file.sync_all().map_err(|e| StoreError::io(tmp, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomically_replaces_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("BHPTNRSur1dq1e4.json");
        write_atomically(&dest, b"{}").unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"{}");
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_failed_write_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the way makes the final rename fail.
        let dest = dir.path().join("BHPTNRSur2dq1e3.json");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("keep"), b"x").unwrap();

        let err = write_atomically(&dest, b"{}").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dest.with_extension("part").exists());
        assert!(dest.join("keep").exists());
    }
}
