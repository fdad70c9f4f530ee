use core::fmt::{self, Write};

pub(crate) type StatusCode = u16;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        408 => "Request Timeout",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Copy, Clone)]
pub(crate) enum ContentType {
    TextHtml,
    TextPlain,
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html; charset=utf-8",
            ContentType::TextPlain => "text/plain; charset=utf-8",
        }
    }
}

/// Status line and headers of a response.
///
/// The server closes every connection after one response, so the head always
/// carries `Connection: close` and an exact `Content-Length`.
pub(crate) struct ResponseHead {
    status: StatusCode,
    content_type: Option<ContentType>,
    content_length: usize,
}

impl ResponseHead {
    pub(crate) const fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            content_length: 0,
        }
    }

    #[must_use]
    pub(crate) const fn with_body(mut self, content_type: ContentType, length: usize) -> Self {
        self.content_type = Some(content_type);
        self.content_length = length;
        self
    }

    pub(super) fn write_to(&self, writer: &mut impl Write) -> fmt::Result {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        if let Some(content_type) = self.content_type {
            write!(writer, "Content-Type: {}\r\n", content_type.as_str())?;
        }
        write!(writer, "Content-Length: {}\r\n", self.content_length)?;
        write!(writer, "Connection: close\r\n\r\n")
    }
}
