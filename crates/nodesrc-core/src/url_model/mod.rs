//! Dist URL construction.
//!
//! Release tarballs live at `https://<host>/dist/<version>/node-<version>.tar.gz`.
//! The version is inserted verbatim; it is only checked for characters that
//! would change the shape of the URL.

mod version;

pub use version::{validate_version, VersionError};

use anyhow::{Context, Result};

/// Host used when the config does not name one.
pub const DEFAULT_DIST_HOST: &str = "nodejs.org";

/// Builds the source tarball URL for `version` on `host`.
///
/// # Examples
///
/// - `dist_url("nodejs.org", "v21.7.3")` →
///   `"https://nodejs.org/dist/v21.7.3/node-v21.7.3.tar.gz"`
pub fn dist_url(host: &str, version: &str) -> Result<String> {
    validate_version(version)?;
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        anyhow::bail!("dist host is empty");
    }
    let url = format!(
        "https://{}/dist/{}/node-{}.tar.gz",
        host, version, version
    );
    let parsed = url::Url::parse(&url).with_context(|| format!("invalid dist URL: {}", url))?;
    if parsed.host_str().is_none() {
        anyhow::bail!("dist URL has no host: {}", url);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_url_matches_template() {
        assert_eq!(
            dist_url("nodejs.org", "v21.7.3").unwrap(),
            "https://nodejs.org/dist/v21.7.3/node-v21.7.3.tar.gz"
        );
        assert_eq!(
            dist_url(DEFAULT_DIST_HOST, "v18.20.4").unwrap(),
            "https://nodejs.org/dist/v18.20.4/node-v18.20.4.tar.gz"
        );
    }

    #[test]
    fn dist_url_keeps_version_verbatim() {
        // no "v" prefix is added
        assert_eq!(
            dist_url("nodejs.org", "20.0.0").unwrap(),
            "https://nodejs.org/dist/20.0.0/node-20.0.0.tar.gz"
        );
    }

    #[test]
    fn dist_url_custom_host() {
        assert_eq!(
            dist_url("mirror.example.com:8443/", "v20.1.0").unwrap(),
            "https://mirror.example.com:8443/dist/v20.1.0/node-v20.1.0.tar.gz"
        );
    }

    #[test]
    fn dist_url_rejects_bad_input() {
        assert!(dist_url("nodejs.org", "").is_err());
        assert!(dist_url("nodejs.org", "v1/../../etc").is_err());
        assert!(dist_url("", "v21.7.3").is_err());
        assert!(dist_url("bad host", "v21.7.3").is_err());
    }
}
