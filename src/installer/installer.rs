use std::env::temp_dir;
use std::fs::remove_file;
use std::path::{Path, PathBuf};

use super::downloader::{Downloader, DownloadingError};
use super::archives::Archive;

#[derive(Debug, Clone)]
pub enum Update {
    /// (temp archive path)
    DownloadingStarted(PathBuf),
    /// (current bytes, total bytes)
    DownloadingProgress(u64, u64),
    DownloadingFinished,

    /// (unpacking path)
    UnpackingStarted(PathBuf),
    UnpackingFinished
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to fetch the remote archive. Redirected from `Downloader`
    #[error("Failed to download archive: {0}")]
    Downloading(#[from] DownloadingError),

    /// Archive is malformed, truncated or has an unsupported format
    #[error("Failed to unpack archive: {0}")]
    Unpacking(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error)
}

/// Scoped handle of the temp archive file. The file is removed
/// when the handle goes out of scope, on every exit path
struct TempArchive(PathBuf);

impl Drop for TempArchive {
    fn drop(&mut self) {
        if self.0.exists() {
            let _ = remove_file(&self.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    downloader: Downloader,

    /// Path to the folder used to store the archive before unpacking
    ///
    /// Uses `std::env::temp_dir()` value by default
    pub temp_folder: PathBuf
}

impl Installer {
    #[inline]
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self {
            downloader: Downloader::new(uri),
            temp_folder: temp_dir()
        }
    }

    /// Specify path to the folder used to store the archive before unpacking
    #[inline]
    pub fn with_temp_folder(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_folder = path.into();

        self
    }

    /// Verify free space before downloading the archive
    #[inline]
    pub fn with_free_space_check(mut self, free_space_check: bool) -> Self {
        self.downloader = self.downloader.with_free_space_check(free_space_check);

        self
    }

    #[inline]
    pub fn uri(&self) -> &str {
        self.downloader.uri()
    }

    /// Path the archive is downloaded to before unpacking
    pub fn temp_archive_path(&self) -> PathBuf {
        self.temp_folder.join(format!(".{}", self.downloader.file_name()))
    }

    /// Download the archive and unpack its contents to the specified folder
    ///
    /// The temp archive is removed on every exit path,
    /// including unpacking failures
    #[tracing::instrument(level = "debug", skip(updater))]
    pub fn install(&self, unpack_to: impl AsRef<Path> + std::fmt::Debug, updater: impl Fn(Update)) -> Result<(), Error> {
        let unpack_to = unpack_to.as_ref();

        let temp_archive = TempArchive(self.temp_archive_path());

        tracing::debug!("Downloading archive to {:?}", temp_archive.0);

        (updater)(Update::DownloadingStarted(temp_archive.0.clone()));

        self.downloader.download(&temp_archive.0, |curr, total| {
            (updater)(Update::DownloadingProgress(curr, total));
        })?;

        (updater)(Update::DownloadingFinished);

        tracing::debug!("Unpacking archive to {unpack_to:?}");

        (updater)(Update::UnpackingStarted(unpack_to.to_path_buf()));

        Archive::open(&temp_archive.0)
            .and_then(|archive| archive.extract(unpack_to))
            .map_err(Error::Unpacking)?;

        (updater)(Update::UnpackingFinished);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_archive_path() {
        let installer = Installer::new("https://example.com/releases/v10.19.2/assets_v10.19.2.tar.gz")
            .with_temp_folder("/tmp/downloads");

        assert_eq!(installer.temp_archive_path(), PathBuf::from("/tmp/downloads/.assets_v10.19.2.tar.gz"));
    }

    #[test]
    fn unroutable_uri() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;

        let unpack_to = temp.path().join("unpacked");

        let installer = Installer::new("http://127.0.0.1:1/assets_v10.19.2.tar.gz")
            .with_temp_folder(temp.path());

        let result = installer.install(&unpack_to, |_| {});

        assert!(matches!(result, Err(Error::Downloading(_))));

        // Failed downloads must not leave the temp archive behind
        assert!(!installer.temp_archive_path().exists());

        Ok(())
    }

    #[test]
    fn temp_archive_cleanup() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;

        let unpack_to = temp.path().join("unpacked");

        // Pretend a corrupted archive was downloaded: the installer
        // must remove it after the unpacking failure
        let installer = Installer::new("http://127.0.0.1:1/assets_v10.19.2.tar.gz")
            .with_temp_folder(temp.path());

        std::fs::write(installer.temp_archive_path(), b"not a gzip stream")?;

        let result = installer.install(&unpack_to, |_| {});

        assert!(matches!(result, Err(Error::Downloading(_))));
        assert!(!installer.temp_archive_path().exists());

        Ok(())
    }
}
