//! Single-stream HTTP GET of the source tarball.
//!
//! Streams the response body sequentially into `<dest>.part`, reporting
//! progress against the final response's `Content-Length`, then renames the
//! temp file to `dest`. Nothing is retried; a failed transfer leaves the
//! `.part` file behind.

mod error;
mod headers;

pub use error::DownloadError;
pub use headers::{parse_headers, ResponseHeaders};

use crate::progress::{Progress, Throttle};
use crate::storage::{self, StorageWriter};
use headers::HeaderCollector;
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;

/// Transfer knobs passed through to libcurl.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Abort when below this many bytes/sec for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub user_agent: String,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            user_agent: format!("nodesrc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Bytes written to the archive.
    pub bytes: u64,
    /// `Content-Length` of the final response, if the server sent one.
    pub total: Option<u64>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
}

/// Downloads `url` with a single GET, writing sequentially to `dest`.
///
/// `on_progress` runs every `report_every` received blocks and once more
/// when the transfer is complete.
pub fn download_to_file(
    url: &str,
    dest: &Path,
    options: &CurlOptions,
    report_every: u32,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<DownloadSummary, DownloadError> {
    let temp = storage::temp_path(dest);
    let storage = StorageWriter::create(&temp)?;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|source| DownloadError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.fail_on_error(true)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.low_speed_limit(options.low_speed_limit)?;
    easy.low_speed_time(options.low_speed_time)?;
    easy.useragent(&options.user_agent)?;

    let headers = RefCell::new(HeaderCollector::default());
    let written = Cell::new(0u64);
    let write_err = RefCell::new(None);
    let mut throttle = Throttle::new(report_every);

    tracing::debug!(url, temp = %temp.display(), "starting download");

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            headers.borrow_mut().push(data);
            true
        })?;
        transfer.write_function(|data| {
            let off = written.get();
            if let Err(e) = storage.write_at(off, data) {
                tracing::warn!("archive write failed: {}", e);
                *write_err.borrow_mut() = Some(e);
                return Ok(0); // abort transfer
            }
            let done = off + data.len() as u64;
            written.set(done);
            if throttle.tick() {
                on_progress(Progress::new(done, headers.borrow().current().content_length));
            }
            Ok(data.len())
        })?;
        transfer.perform()
    };

    let received = written.get();
    let response = headers.into_inner().current().clone();
    let total = response.content_length;

    if let Some(e) = write_err.into_inner() {
        return Err(DownloadError::Storage(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            return Err(DownloadError::Http(easy.response_code()?));
        }
        if e.is_partial_file() {
            return Err(DownloadError::PartialTransfer {
                expected: total.unwrap_or(received),
                received,
            });
        }
        return Err(e.into());
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(DownloadError::Http(code));
    }
    if let Some(expected) = total {
        if expected != received {
            return Err(DownloadError::PartialTransfer { expected, received });
        }
    }

    on_progress(Progress::new(received, total));
    tracing::debug!(
        content_type = ?response.content_type,
        etag = ?response.etag,
        "final response headers"
    );
    if let Some(ct) = response.content_type.as_deref() {
        if !ct.contains("gzip") && ct != "application/octet-stream" {
            tracing::warn!(content_type = ct, "unexpected content type for a .tar.gz");
        }
    }

    storage.sync()?;
    storage.finalize(dest)?;
    tracing::info!(bytes = received, dest = %dest.display(), "download complete");

    Ok(DownloadSummary {
        bytes: received,
        total,
        content_type: response.content_type,
        etag: response.etag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_leaves_no_archive() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("node_src.tar.gz");
        let err = download_to_file(
            "http://exa\0mple.com/",
            &dest,
            &CurlOptions::default(),
            5,
            &mut |_: Progress| {},
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DownloadError::InvalidUrl { .. } | DownloadError::Curl(_)
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn unwritable_destination_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing-dir").join("node_src.tar.gz");
        let err = download_to_file(
            "http://127.0.0.1:9/",
            &dest,
            &CurlOptions::default(),
            5,
            &mut |_: Progress| {},
        )
        .unwrap_err();
        assert!(matches!(err, DownloadError::Storage(_)));
    }
}
