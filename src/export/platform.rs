//! Host capabilities the export pipeline delivers through.
//!
//! A host provides a share surface, a direct download and a way to show
//! the user a notice. Each is a trait so hosts without a share surface can
//! plug in [`NoShare`] and tests can record calls.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PetalError, Result};
use crate::output::Printer;

/// A file handed to the share surface or the download fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Everything passed to the share surface in one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub files: Vec<SharedFile>,
    pub text: String,
}

/// How a share invocation ended. Both count as a successful export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareOutcome {
    Completed,
    Cancelled,
}

/// A native share surface.
pub trait SharePlatform {
    /// Whether this exact payload shape can be shared.
    fn can_share(&self, payload: &SharePayload) -> bool;

    /// Hand the payload over and wait until the user finishes or cancels.
    fn share(&self, payload: &SharePayload) -> Result<ShareOutcome>;
}

/// Direct file download, used when sharing is unavailable.
pub trait Downloader {
    /// Save the file and return where it ended up.
    fn download(&self, file: &SharedFile) -> Result<PathBuf>;
}

/// User-visible notices.
pub trait Notifier {
    fn notice(&self, message: &str);
}

/// A host with no share surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShare;

impl SharePlatform for NoShare {
    fn can_share(&self, _payload: &SharePayload) -> bool {
        false
    }

    fn share(&self, _payload: &SharePayload) -> Result<ShareOutcome> {
        Err(PetalError::ShareUnavailable)
    }
}

/// Downloads into a directory on disk, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Downloader for DirectoryDownload {
    fn download(&self, file: &SharedFile) -> Result<PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| PetalError::Io {
                path: self.dir.clone(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }

        let path = self.dir.join(&file.name);
        fs::write(&path, &file.bytes).map_err(|e| PetalError::Delivery {
            message: format!("Failed to write {}: {}", path.display(), e),
            help: None,
        })?;

        Ok(path)
    }
}

impl Notifier for Printer {
    fn notice(&self, message: &str) {
        self.warning("Notice", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn png_file() -> SharedFile {
        SharedFile {
            name: "flower.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_no_share_is_never_capable() {
        let payload = SharePayload {
            title: "t".to_string(),
            files: vec![png_file()],
            text: "x".to_string(),
        };
        assert!(!NoShare.can_share(&payload));
        assert!(matches!(
            NoShare.share(&payload),
            Err(PetalError::ShareUnavailable)
        ));
    }

    #[test]
    fn test_directory_download_creates_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let download = DirectoryDownload::new(&target);

        let path = download.download(&png_file()).unwrap();

        assert_eq!(path, target.join("flower.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_directory_download_overwrites() {
        let dir = tempdir().unwrap();
        let download = DirectoryDownload::new(dir.path());

        download.download(&png_file()).unwrap();
        let mut second = png_file();
        second.bytes = vec![9];
        let path = download.download(&second).unwrap();

        assert_eq!(fs::read(path).unwrap(), vec![9]);
    }
}
