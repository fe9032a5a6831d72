//! Download error type.

use thiserror::Error;

/// Error returned by a tarball download (curl failure, HTTP error, or storage failure).
#[derive(Debug, Error)]
pub enum DownloadError {
    /// URL could not be handed to curl.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Transfer completed but the body was shorter or longer than `Content-Length`.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Disk/storage write failed (e.g. disk full, permission denied).
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}
