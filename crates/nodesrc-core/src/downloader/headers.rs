//! Parse HTTP response header lines as curl hands them over.

/// Headers of the final response that matter for the download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// Entity tag with the surrounding quotes removed.
    pub etag: Option<String>,
}

/// Parse collected header lines into ResponseHeaders.
pub fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut out = ResponseHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    out.content_length = Some(n);
                }
            } else if name.eq_ignore_ascii_case("content-type") {
                out.content_type = Some(value.to_string());
            } else if name.eq_ignore_ascii_case("etag") {
                out.etag = Some(value.trim_matches('"').to_string());
            }
        }
    }

    out
}

/// Accumulates header lines across redirects; only the last response block counts.
#[derive(Debug, Default)]
pub(crate) struct HeaderCollector {
    lines: Vec<String>,
    current: ResponseHeaders,
}

impl HeaderCollector {
    /// Feed one raw header line (including the status line and the blank terminator).
    pub(crate) fn push(&mut self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            // new response (redirect hop or 100-continue): forget the previous block
            self.lines.clear();
            self.current = ResponseHeaders::default();
            return;
        }
        if line.is_empty() {
            self.current = parse_headers(&self.lines);
            return;
        }
        self.lines.push(line.to_string());
    }

    /// Headers of the most recently completed response block.
    pub(crate) fn current(&self) -> &ResponseHeaders {
        &self.current
    }
}
