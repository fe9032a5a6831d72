//! Extraction error type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading or decoding the archive failed (truncated file, bad gzip/tar data).
    #[error("reading archive {}: {source}", .archive.display())]
    Archive {
        archive: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing an extracted member failed.
    #[error("writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Member path is absolute or climbs out of the destination.
    #[error("unsafe path in archive: {}", .0.display())]
    UnsafePath(PathBuf),
    /// Link member whose target leaves the destination.
    #[error("unsafe link in archive: {} -> {}", .path.display(), .target.display())]
    UnsafeLink { path: PathBuf, target: PathBuf },
}

impl ExtractError {
    pub(crate) fn archive(archive: &std::path::Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ExtractError::Archive {
            archive: archive.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ExtractError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
