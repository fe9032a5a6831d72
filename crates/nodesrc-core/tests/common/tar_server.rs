//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body for GET. Can misreport `Content-Length`,
//! omit it, answer with an error status, or redirect first.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

/// Entity tag sent (quoted) with every 200 response.
pub const ETAG: &str = "node-src-fixture";

/// How the `Content-Length` header is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLength {
    /// Actual body length.
    Exact,
    /// No header; the body ends when the connection closes.
    Omit,
    /// Claim this many bytes regardless of the body.
    Declared(u64),
}

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    pub status: u16,
    pub content_length: ContentLength,
    /// Answer every path except `/final` with a 302 to `/final`.
    pub redirect: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            content_length: ContentLength::Exact,
            redirect: false,
        }
    }
}

/// Starts a server in a background thread serving `body`. Returns a URL
/// ending in `node.tar.gz`. The server runs until the process exits.
pub fn start(body: Vec<u8>) -> String {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            thread::spawn(move || handle(stream, &body, opts));
        }
    });
    format!("http://127.0.0.1:{}/dist/node.tar.gz", port)
}

fn handle(mut stream: std::net::TcpStream, body: &[u8], opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    if opts.redirect && path != "/final" {
        let _ = stream.write_all(
            b"HTTP/1.1 302 Found\r\nLocation: /final\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    }

    if opts.status != 200 {
        let msg = b"no such release";
        let response = format!(
            "HTTP/1.1 {} Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            opts.status,
            msg.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(msg);
        return;
    }

    let length_header = match opts.content_length {
        ContentLength::Exact => format!("Content-Length: {}\r\n", body.len()),
        ContentLength::Omit => String::new(),
        ContentLength::Declared(n) => format!("Content-Length: {}\r\n", n),
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/gzip\r\nETag: \"{}\"\r\n{}Connection: close\r\n\r\n",
        ETAG, length_header
    );
    let _ = stream.write_all(response.as_bytes());
    // several writes so the client sees more than one chunk
    for chunk in body.chunks(4096) {
        if stream.write_all(chunk).is_err() {
            return;
        }
    }
    let _ = stream.flush();
}

fn parse_request_line(request: &str) -> (&str, &str) {
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}
