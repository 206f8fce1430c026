use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use super::free_space;

/// Default downloading chunk size, in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 16;

/// Default value for the free space check option
pub const DEFAULT_FREE_SPACE_CHECK: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DownloadingError {
    /// Specified downloads path is not mounted to any disk
    #[error("Path is not mounted: {0:?}")]
    PathNotMounted(PathBuf),

    /// No free space available under specified path
    ///
    /// `(path, required, available)`
    #[error("No free space available for specified path: {0:?} (requires {1}, available {2})")]
    NoSpaceAvailable(PathBuf, u64, u64),

    /// Failed to create or write to the output file
    ///
    /// `(path, error message)`
    #[error("Failed to write to output file {0:?}: {1}")]
    OutputFileError(PathBuf, String),

    /// Server responded with a non-success status code
    #[error("Server responded with status code {0}")]
    InvalidStatusCode(i32),

    /// minreq error
    #[error("minreq error: {0}")]
    Minreq(String)
}

impl From<minreq::Error> for DownloadingError {
    #[inline]
    fn from(error: minreq::Error) -> Self {
        Self::Minreq(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloader {
    uri: String,

    /// Amount of bytes stored in memory before being flushed to the output file
    ///
    /// Uses `DEFAULT_CHUNK_SIZE` value by default
    pub chunk_size: usize,

    /// Verify that the output folder has enough free space
    /// before downloading starts
    ///
    /// Uses `DEFAULT_FREE_SPACE_CHECK` value by default
    pub free_space_check: bool
}

impl Downloader {
    #[inline]
    pub fn new(uri: impl AsRef<str>) -> Self {
        Self {
            uri: uri.as_ref().to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            free_space_check: DEFAULT_FREE_SPACE_CHECK
        }
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;

        self
    }

    #[inline]
    pub fn with_free_space_check(mut self, free_space_check: bool) -> Self {
        self.free_space_check = free_space_check;

        self
    }

    /// Get name of the downloading file from its uri
    ///
    /// - `https://example.com/example.zip` -> `example.zip`
    /// - `https://example.com` -> `index.html`
    pub fn file_name(&self) -> String {
        let uri = self.uri
            .replace('\\', "/")
            .replace("://", "");

        uri.split('?').next()
            .and_then(|uri| uri.split('/')
                .filter(|part| !part.is_empty())
                .skip(1)
                .last())
            .unwrap_or("index.html")
            .to_string()
    }

    /// Download the file to the specified path, reporting progress
    /// as `(downloaded bytes, total bytes)`
    ///
    /// Redirects are followed by the underlying HTTP client. The output
    /// file is not created until the server responds with a success status
    pub fn download(&self, path: impl AsRef<Path>, progress: impl Fn(u64, u64)) -> Result<(), DownloadingError> {
        let path = path.as_ref();

        tracing::trace!("Downloading {} to {path:?}", self.uri);

        let response = minreq::get(self.uri.as_str()).send_lazy()?;

        if !(200..300).contains(&response.status_code) {
            tracing::error!("Got status code {} for {}", response.status_code, self.uri);

            return Err(DownloadingError::InvalidStatusCode(response.status_code));
        }

        let content_length = response.headers.get("content-length")
            .and_then(|length| length.parse::<u64>().ok());

        if self.free_space_check {
            let folder = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from(".")
            };

            let Some(available) = free_space::available(&folder) else {
                return Err(DownloadingError::PathNotMounted(folder));
            };

            if let Some(required) = content_length {
                if available < required {
                    return Err(DownloadingError::NoSpaceAvailable(folder, required, available));
                }
            }
        }

        let mut file = File::create(path)
            .map_err(|err| DownloadingError::OutputFileError(path.to_path_buf(), err.to_string()))?;

        let total = content_length.unwrap_or(response.size_hint().0 as u64);

        let mut buffer = vec![0; self.chunk_size];

        let mut fetched = 0;
        let mut stored = 0;

        for byte in response {
            let (byte, _) = byte?;

            buffer[stored] = byte;

            stored += 1;
            fetched += 1;

            if stored == self.chunk_size {
                file.write_all(&buffer)
                    .map_err(|err| DownloadingError::OutputFileError(path.to_path_buf(), err.to_string()))?;

                stored = 0;

                (progress)(fetched, std::cmp::max(total, fetched));
            }
        }

        file.write_all(&buffer[..stored])
            .map_err(|err| DownloadingError::OutputFileError(path.to_path_buf(), err.to_string()))?;

        (progress)(fetched, std::cmp::max(total, fetched));

        Ok(())
    }
}
