//! HTTP request head handling
//!
//! Transport-free pieces of the control page server: collecting a request head
//! from arbitrary socket reads, parsing it, sizing the body read, and the error
//! type shared with the socket layer.

use crate::control::BodyError;

/// Bytes of a request head kept for parsing. Anything past this is read and
/// discarded up to the blank line.
pub const MAX_HEAD_LEN: usize = 1024;

/// Request handling errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peer closed or reset the connection
    Closed,
    /// Malformed request head
    Parse,
    /// The request carries no body
    NoData,
    /// Receive deadline passed
    Timeout,
    /// Response head did not fit its buffer
    FormatHeaders,
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl From<embassy_time::TimeoutError> for Error {
    fn from(_error: embassy_time::TimeoutError) -> Self {
        Error::Timeout
    }
}

impl From<Error> for BodyError {
    fn from(error: Error) -> Self {
        match error {
            Error::Timeout => BodyError::Timeout,
            _ => BodyError::Other,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    /// Any method this server has no route for
    Other,
}

impl HttpMethod {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            _ => HttpMethod::Other,
        }
    }
}

/// Request line plus the one header the server cares about.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestHead<'a> {
    pub method: HttpMethod,
    pub target: &'a str,
    /// `Content-Length`, zero when absent or unreadable
    pub content_length: usize,
}

impl<'a> RequestHead<'a> {
    /// Parse the request line and header lines of a head.
    pub fn parse(head: &'a str) -> Option<Self> {
        let mut lines = head.split("\r\n");
        let mut request_line = lines.next()?.split_ascii_whitespace();
        let method = HttpMethod::parse(request_line.next()?);
        let target = request_line.next()?;
        let content_length = lines.find_map(content_length).unwrap_or(0);

        Some(Self {
            method,
            target,
            content_length,
        })
    }

    /// Target without the query string.
    pub fn path(&self) -> &'a str {
        self.target
            .split_once('?')
            .map_or(self.target, |(path, _)| path)
    }
}

fn content_length(line: &str) -> Option<usize> {
    let (name, value) = line.split_once(':')?;
    if name.trim().eq_ignore_ascii_case("content-length") {
        value.trim().parse().ok()
    } else {
        None
    }
}

/// Number of body bytes to read for a request.
///
/// Bounded by `Content-Length`, by the caller's `limit` and by the receive
/// buffer.
pub const fn body_read_len(content_length: usize, limit: usize, buffer: usize) -> usize {
    let wanted = if content_length < limit {
        content_length
    } else {
        limit
    };
    if wanted < buffer { wanted } else { buffer }
}

/// Collects a request head across socket reads.
///
/// Keeps the first `N` bytes and scans the rest only for the blank line, so an
/// oversized head still yields its request line and leading headers.
pub struct HeadReader<const N: usize> {
    buf: [u8; N],
    len: usize,
    /// Progress through `\r\n\r\n`
    matched: u8,
    truncated: bool,
}

impl<const N: usize> HeadReader<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            matched: 0,
            truncated: false,
        }
    }

    /// Feed received bytes.
    ///
    /// Returns how many bytes of `chunk` belong to the head once the blank line
    /// has been seen; the remainder is the start of the body.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<usize> {
        for (i, &byte) in chunk.iter().enumerate() {
            if self.len < N {
                self.buf[self.len] = byte;
                self.len += 1;
            } else {
                self.truncated = true;
            }

            self.matched = match (self.matched, byte) {
                (0 | 2, b'\r') | (1 | 3, b'\n') => self.matched + 1,
                (_, b'\r') => 1,
                _ => 0,
            };
            if self.matched == 4 {
                return Some(i + 1);
            }
        }
        None
    }

    /// Whether bytes were dropped from the kept head.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The kept head. A truncated head is cut back to its last complete line.
    pub fn head(&self) -> &[u8] {
        let kept = &self.buf[..self.len];
        if !self.truncated {
            return kept;
        }
        match kept.windows(2).rposition(|w| w == b"\r\n") {
            Some(pos) => &kept[..pos],
            None => &[],
        }
    }
}

impl<const N: usize> Default for HeadReader<N> {
    fn default() -> Self {
        Self::new()
    }
}
