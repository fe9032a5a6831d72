//! Release version string checks.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("node version is empty")]
    Empty,
    #[error("node version {0:?} is not a path segment")]
    Reserved(String),
    #[error("node version {version:?} contains {found:?}")]
    InvalidChar { version: String, found: char },
}

/// Rejects versions that would not form a single URL path segment.
pub fn validate_version(version: &str) -> Result<(), VersionError> {
    if version.is_empty() {
        return Err(VersionError::Empty);
    }
    if version == "." || version == ".." {
        return Err(VersionError::Reserved(version.to_string()));
    }
    if let Some(found) = version
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | '%'))
    {
        return Err(VersionError::InvalidChar {
            version: version.to_string(),
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_release_tags() {
        assert!(validate_version("v21.7.3").is_ok());
        assert!(validate_version("v22.0.0-rc.1").is_ok());
        assert!(validate_version("latest-v20.x").is_ok());
    }

    #[test]
    fn rejects_empty_and_reserved() {
        assert_eq!(validate_version(""), Err(VersionError::Empty));
        assert!(matches!(validate_version(".."), Err(VersionError::Reserved(_))));
    }

    #[test]
    fn rejects_separators() {
        for bad in ["v1/2", "v1\\2", "v1?x", "v1#x", "v 1", "v1\t"] {
            assert!(
                matches!(validate_version(bad), Err(VersionError::InvalidChar { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
