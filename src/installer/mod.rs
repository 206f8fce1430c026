pub mod downloader;
pub mod archives;
pub mod installer;
pub mod free_space;

pub mod prelude {
    pub use super::downloader::{Downloader, DownloadingError};
    pub use super::archives::{Archive, Entry, EntrySize};
    pub use super::installer::{
        Installer,
        Update as InstallerUpdate,
        Error as InstallerError
    };
    pub use super::free_space;
}
