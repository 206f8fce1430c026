use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use tar::Archive as TarArchive;

use xz::read::XzDecoder;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Zip,
    Tar,
    TarXz,
    TarGz,
    TarBz2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySize {
    Compressed(u64),
    Uncompressed(u64),
    Both {
        compressed: u64,
        uncompressed: u64
    }
}

impl EntrySize {
    /// Get size of the unpacked entry where it's known,
    /// and of the compressed one otherwise
    pub fn size(&self) -> u64 {
        match self {
            Self::Compressed(size) |
            Self::Uncompressed(size) => *size,

            Self::Both { uncompressed, .. } => *uncompressed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub size: EntrySize
}

/// Archive format is identified by the file extension. Readers are
/// opened per operation because tar entries listing consumes the reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    path: PathBuf,
    format: Format
}

impl Archive {
    /// Try to open the archive, identifying its format by the extension
    ///
    /// Supported formats: `zip`, `tar`, `tar.xz`, `tar.gz`, `tar.bz2`
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path: PathBuf = path.into();

        if !path.is_file() {
            anyhow::bail!("Archive doesn't exist: {path:?}");
        }

        let name = path.to_string_lossy().to_ascii_lowercase();

        let format = if name.ends_with(".tar.xz") {
            Format::TarXz
        }

        else if name.ends_with(".tar.gz") {
            Format::TarGz
        }

        else if name.ends_with(".tar.bz2") {
            Format::TarBz2
        }

        else if name.ends_with(".tar") {
            Format::Tar
        }

        else if name.ends_with(".zip") {
            Format::Zip
        }

        else {
            anyhow::bail!("Archive format is not supported: {path:?}");
        };

        Ok(Self {
            path,
            format
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// List archive entries
    pub fn entries(&self) -> anyhow::Result<Vec<Entry>> {
        let file = File::open(&self.path)?;

        match self.format {
            Format::Zip => {
                let mut zip = ZipArchive::new(file)?;

                let mut entries = Vec::with_capacity(zip.len());

                for i in 0..zip.len() {
                    let entry = zip.by_index(i)?;

                    entries.push(Entry {
                        path: PathBuf::from(entry.name()),
                        size: EntrySize::Both {
                            compressed: entry.compressed_size(),
                            uncompressed: entry.size()
                        }
                    });
                }

                Ok(entries)
            }

            Format::Tar    => tar_entries(TarArchive::new(file)),
            Format::TarXz  => tar_entries(TarArchive::new(XzDecoder::new(file))),
            Format::TarGz  => tar_entries(TarArchive::new(GzDecoder::new(file))),
            Format::TarBz2 => tar_entries(TarArchive::new(BzDecoder::new(file)))
        }
    }

    /// Extract archive contents to the specified folder, preserving
    /// the archive's internal structure
    pub fn extract(&self, folder: impl AsRef<Path>) -> anyhow::Result<()> {
        let folder = folder.as_ref();

        std::fs::create_dir_all(folder)?;

        let file = File::open(&self.path)?;

        match self.format {
            Format::Zip => ZipArchive::new(file)?.extract(folder)?,

            Format::Tar    => TarArchive::new(file).unpack(folder)?,
            Format::TarXz  => TarArchive::new(XzDecoder::new(file)).unpack(folder)?,
            Format::TarGz  => TarArchive::new(GzDecoder::new(file)).unpack(folder)?,
            Format::TarBz2 => TarArchive::new(BzDecoder::new(file)).unpack(folder)?
        }

        Ok(())
    }
}

fn tar_entries<R: Read>(mut archive: TarArchive<R>) -> anyhow::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for entry in archive.entries()? {
        let entry = entry?;

        entries.push(Entry {
            path: entry.path()?.to_path_buf(),
            size: EntrySize::Uncompressed(entry.size())
        });
    }

    Ok(entries)
}
