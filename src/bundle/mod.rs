use std::fs::{create_dir_all, remove_dir_all};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::consts;
use crate::version::Version;

use crate::installer::installer::{
    Installer,
    Update,
    Error
};

/// Versioned asset bundle unpacked in a local target folder
///
/// The bundle is installed by downloading the release archive
/// of its version and unpacking it to the target folder. The archive
/// ships a version marker file, so the presence of this file means
/// the bundle was fully unpacked before and no work is needed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    version: Version,
    path: PathBuf,

    release_host: String,
    temp_folder: PathBuf,
    free_space_check: bool
}

impl Bundle {
    #[inline]
    pub fn new(version: Version, path: impl Into<PathBuf>) -> Self {
        Self {
            version,
            path: path.into(),

            release_host: consts::DEFAULT_RELEASE_HOST.to_string(),
            temp_folder: std::env::temp_dir(),
            free_space_check: true
        }
    }

    /// Specify location release archives are downloaded from
    #[inline]
    pub fn with_release_host(mut self, host: impl AsRef<str>) -> Self {
        self.release_host = host.as_ref().to_string();

        self
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
        self.free_space_check = free_space_check;

        self
    }

    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Path to the version marker file
    ///
    /// The marker is shipped inside the release archive, so it appears
    /// in the target folder only after a complete unpacking
    #[inline]
    pub fn marker_path(&self) -> PathBuf {
        consts::marker_path(&self.path, self.version)
    }

    /// Downloading URI of the release archive for this bundle version
    #[inline]
    pub fn download_uri(&self) -> String {
        consts::download_uri(&self.release_host, self.version)
    }

    /// Check if this bundle version is installed
    ///
    /// Only the marker file presence is checked. Files removed
    /// from the target folder while the marker is kept in place
    /// will not be detected
    #[inline]
    pub fn is_installed(&self) -> bool {
        self.marker_path().is_file()
    }

    /// Get size of the unpacked bundle, in bytes
    #[inline]
    pub fn installed_size(&self) -> Option<u64> {
        fs_extra::dir::get_size(&self.path).ok()
    }

    /// Ensure the bundle version is unpacked in the target folder
    ///
    /// Returns immediately if the version marker file exists. Otherwise
    /// the target folder is removed with all its contents, recreated,
    /// and the release archive is downloaded and unpacked into it.
    /// Failed runs leave no marker behind, so the next call repeats
    /// the whole sequence
    #[tracing::instrument(level = "debug", skip(updater), ret)]
    pub fn ensure_installed(&self, updater: impl Fn(Update)) -> Result<(), Error> {
        if self.is_installed() {
            tracing::debug!("Bundle is already installed");

            return Ok(());
        }

        tracing::debug!("Bundle is not installed");

        // Stale files of another version, or of a failed unpacking,
        // could shadow the new version's files
        if self.path.exists() {
            remove_dir_all(&self.path)?;
        }

        create_dir_all(&self.path)?;

        let result = Installer::new(self.download_uri())
            .with_temp_folder(self.temp_folder.clone())
            .with_free_space_check(self.free_space_check)
            .install(&self.path, updater);

        if let Err(err) = &result {
            tracing::error!("Failed to install bundle: {err}");
        }

        result
    }
}
