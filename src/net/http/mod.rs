//! Minimal HTTP/1.1 server: one request per connection.

pub(crate) mod connection;
pub(crate) mod headers;
pub(crate) mod server;

pub(crate) use connection::HttpConnection;
pub(crate) use headers::ContentType;
pub(crate) use led_panel_core::http::{Error, HttpMethod};
pub(crate) use server::{HttpHandler, HttpServer};

pub(crate) type HttpResult = Result<(), Error>;

/// The only TCP error is a reset, seen by the handler as a closed connection.
pub(crate) fn socket_error(_error: embassy_net::tcp::Error) -> Error {
    Error::Closed
}
