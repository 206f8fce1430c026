use std::path::{Path, PathBuf};

use crate::version::Version;

/// Name of the asset bundle. Used in both the release archive
/// and the version marker file names
pub const ASSET_NAME: &str = "assets";

/// Extension of the release archive
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Extension of the version marker file shipped inside the release archive
pub const MARKER_EXTENSION: &str = "version";

/// Default location release archives are downloaded from
pub const DEFAULT_RELEASE_HOST: &str = "https://github.com/an-anime-team/asset-bundle/releases/download";

/// Get name of the release archive for the given bundle version
///
/// `assets_v10.19.2.tar.gz`
#[inline]
pub fn archive_name(version: Version) -> String {
    format!("{ASSET_NAME}_{}.{ARCHIVE_EXTENSION}", version.tag())
}

/// Get name of the version marker file for the given bundle version
///
/// `assets_v10.19.2.version`
#[inline]
pub fn marker_name(version: Version) -> String {
    format!("{ASSET_NAME}_{}.{MARKER_EXTENSION}", version.tag())
}

/// Build downloading URI of the release archive for the given bundle version
///
/// `<host>/<tag>/<asset name>_<tag>.<archive extension>`
#[inline]
pub fn download_uri(host: impl AsRef<str>, version: Version) -> String {
    format!("{}/{}/{}", host.as_ref(), version.tag(), archive_name(version))
}

/// Get path to the version marker file inside the target folder
#[inline]
pub fn marker_path(target: impl AsRef<Path>, version: Version) -> PathBuf {
    target.as_ref().join(marker_name(version))
}
