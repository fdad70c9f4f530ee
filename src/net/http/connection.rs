use embassy_net::tcp::TcpSocket;
use embassy_time::{Duration, Instant, with_deadline};
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use led_panel_core::http::{HeadReader, MAX_HEAD_LEN, RequestHead, body_read_len};

use super::{
    Error,
    HttpMethod,
    HttpResult,
    headers::{ContentType, ResponseHead, StatusCode},
    socket_error,
};

const READ_CHUNK_SIZE: usize = 512;
const RESPONSE_HEAD_SIZE: usize = 256;
const BODY_BUFFER_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 1024;

/// One request/response exchange on an accepted socket.
pub(crate) struct HttpConnection<'a> {
    method: HttpMethod,
    path: String<64>,
    content_length: usize,

    socket: TcpSocket<'a>,
    /// Bytes read past the head, the start of the body
    early_body: Vec<u8, READ_CHUNK_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read and parse the request head.
    ///
    /// Heads longer than [`MAX_HEAD_LEN`] are parsed from their leading lines.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut reader = HeadReader::<MAX_HEAD_LEN>::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let (head_bytes, received) = loop {
            let n = socket.read(&mut chunk).await.map_err(socket_error)?;
            if n == 0 {
                return Err(Error::Closed);
            }
            if let Some(head_bytes) = reader.feed(&chunk[..n]) {
                break (head_bytes, n);
            }
        };

        let head = core::str::from_utf8(reader.head()).map_err(|_| Error::Parse)?;
        let request = RequestHead::parse(head).ok_or(Error::Parse)?;

        let mut path = String::new();
        path.push_str(request.path()).map_err(|()| Error::Parse)?;
        let early_body =
            Vec::from_slice(&chunk[head_bytes..received]).map_err(|()| Error::Parse)?;

        Ok(Self {
            method: request.method,
            path,
            content_length: request.content_length,
            socket,
            early_body,
            body_buf: Vec::new(),
        })
    }

    /// Request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &str) {
        (self.method, self.path.as_str())
    }

    /// Read at most `limit` bytes of the request body.
    ///
    /// Stops at `Content-Length`. Fails with [`Error::Timeout`] if the bytes do
    /// not arrive within `timeout`, and with [`Error::NoData`] if the request
    /// has no body.
    pub(crate) async fn read_body(&mut self, limit: usize, timeout: Duration) -> Result<&[u8], Error> {
        let wanted = body_read_len(self.content_length, limit, BODY_BUFFER_SIZE);
        if wanted == 0 {
            return Err(Error::NoData);
        }

        self.body_buf.clear();
        let early = &self.early_body[..self.early_body.len().min(wanted)];
        self.body_buf.extend_from_slice(early).map_err(|()| Error::Parse)?;

        let deadline = Instant::now() + timeout;
        while self.body_buf.len() < wanted {
            let filled = self.body_buf.len();
            self.body_buf.resize(wanted, 0).map_err(|()| Error::Parse)?;
            let n = with_deadline(deadline, self.socket.read(&mut self.body_buf[filled..]))
                .await?
                .map_err(socket_error)?;
            self.body_buf.truncate(filled + n);
            if n == 0 {
                break;
            }
        }

        if self.body_buf.is_empty() {
            return Err(Error::Closed);
        }
        Ok(self.body_buf.as_slice())
    }

    /// Write a complete response.
    pub(crate) async fn respond(
        &mut self,
        status: StatusCode,
        content_type: ContentType,
        body: &[u8],
    ) -> HttpResult {
        let mut head = String::<RESPONSE_HEAD_SIZE>::new();
        ResponseHead::new(status)
            .with_body(content_type, body.len())
            .write_to(&mut head)?;
        self.socket.write_all(head.as_bytes()).await.map_err(socket_error)?;

        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await.map_err(socket_error)?;
        }
        self.socket.flush().await.map_err(socket_error)?;
        Ok(())
    }

    /// Close the write half and wait until queued data is sent.
    pub(crate) async fn finish(mut self) -> HttpResult {
        self.socket.close();
        self.socket.flush().await.map_err(socket_error)
    }
}
