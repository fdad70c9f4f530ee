//! Request head collection and parsing.

use led_panel_core::{
    BodyError, HeadReader, HttpMethod, MAX_FORM_BODY, MAX_HEAD_LEN, RequestHead, body_read_len,
    http::Error,
};

const BROWSER_POST: &str = "POST / HTTP/1.1\r\n\
Host: 192.168.4.1\r\n\
Connection: keep-alive\r\n\
Content-Length: 14\r\n\
Cache-Control: max-age=0\r\n\
Upgrade-Insecure-Requests: 1\r\n\
Origin: http://192.168.4.1\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
User-Agent: Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Mobile Safari/537.36\r\n\
Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7\r\n\
Referer: http://192.168.4.1/\r\n\
Accept-Encoding: gzip, deflate\r\n\
Accept-Language: en-US,en;q=0.9,de;q=0.8\r\n\
\r\n";

const FORM_BODY: &[u8] = b"mode=1&speed=1";

fn request_bytes() -> Vec<u8> {
    let mut bytes = BROWSER_POST.as_bytes().to_vec();
    bytes.extend_from_slice(FORM_BODY);
    bytes
}

/// Feed `bytes` in chunks of `size`, returning the head length and the body
/// bytes that arrived with the final chunk.
fn feed_in_chunks<const N: usize>(
    reader: &mut HeadReader<N>,
    bytes: &[u8],
    size: usize,
) -> (usize, Vec<u8>) {
    let mut offset = 0;
    for chunk in bytes.chunks(size) {
        if let Some(head_bytes) = reader.feed(chunk) {
            return (offset + head_bytes, chunk[head_bytes..].to_vec());
        }
        offset += chunk.len();
    }
    panic!("head never ended");
}

#[test]
fn browser_post_head_is_longer_than_a_single_read() {
    assert!(BROWSER_POST.len() > 512);
    assert!(BROWSER_POST.len() < MAX_HEAD_LEN);
}

#[test]
fn collects_browser_head_across_reads() {
    let bytes = request_bytes();
    let mut reader = HeadReader::<MAX_HEAD_LEN>::new();

    let (head_len, early_body) = feed_in_chunks(&mut reader, &bytes, 512);

    assert_eq!(head_len, BROWSER_POST.len());
    assert_eq!(early_body, FORM_BODY);
    assert!(!reader.is_truncated());

    let head = core::str::from_utf8(reader.head()).unwrap();
    let request = RequestHead::parse(head).unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path(), "/");
    assert_eq!(request.content_length, 14);
}

#[test]
fn head_end_is_found_when_split_between_reads() {
    let bytes = request_bytes();
    let mut reader = HeadReader::<MAX_HEAD_LEN>::new();

    // Every read boundary falls somewhere new, including inside "\r\n\r\n"
    let (head_len, early_body) = feed_in_chunks(&mut reader, &bytes, 3);

    assert_eq!(head_len, BROWSER_POST.len());
    assert!(FORM_BODY.starts_with(&early_body));
}

#[test]
fn oversized_head_keeps_leading_lines() {
    let bytes = request_bytes();
    let mut reader = HeadReader::<128>::new();

    let (head_len, early_body) = feed_in_chunks(&mut reader, &bytes, 64);

    assert_eq!(head_len, BROWSER_POST.len());
    assert_eq!(early_body, FORM_BODY);
    assert!(reader.is_truncated());

    let head = core::str::from_utf8(reader.head()).unwrap();
    assert!(head.len() <= 128);
    assert!(!head.ends_with("\r\n"));

    let request = RequestHead::parse(head).unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path(), "/");
    assert_eq!(request.content_length, 14);
}

#[test]
fn partial_header_line_is_not_parsed() {
    let bytes = b"POST / HTTP/1.1\r\nContent-Length: 14\r\n\r\n";

    // Room for "Content-Length: 1" but not the "4" after it
    let mut cut = HeadReader::<34>::new();
    assert_eq!(cut.feed(bytes), Some(bytes.len()));
    let head = core::str::from_utf8(cut.head()).unwrap();
    assert_eq!(head, "POST / HTTP/1.1");
    assert_eq!(RequestHead::parse(head).unwrap().content_length, 0);

    let mut whole = HeadReader::<64>::new();
    assert_eq!(whole.feed(bytes), Some(bytes.len()));
    let head = core::str::from_utf8(whole.head()).unwrap();
    assert_eq!(RequestHead::parse(head).unwrap().content_length, 14);
}

#[test]
fn nothing_kept_without_room() {
    let mut reader = HeadReader::<0>::new();

    assert_eq!(reader.feed(b"GET / HTTP/1.1\r\n\r\n"), Some(18));
    assert!(reader.is_truncated());
    assert!(reader.head().is_empty());
}

#[test]
fn content_length_name_is_case_insensitive() {
    let head = "POST / HTTP/1.1\r\nhost: esp32.local\r\ncontent-length: 14\r\n\r\n";

    let request = RequestHead::parse(head).unwrap();

    assert_eq!(request.content_length, 14);
}

#[test]
fn missing_content_length_is_zero() {
    let head = "POST / HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n";

    assert_eq!(RequestHead::parse(head).unwrap().content_length, 0);
}

#[test]
fn unreadable_content_length_is_zero() {
    let head = "POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n";

    assert_eq!(RequestHead::parse(head).unwrap().content_length, 0);
}

#[test]
fn methods_and_query_strings() {
    let get = RequestHead::parse("GET /?mode=1 HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(get.method, HttpMethod::Get);
    assert_eq!(get.target, "/?mode=1");
    assert_eq!(get.path(), "/");

    let put = RequestHead::parse("PUT /index.html HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(put.method, HttpMethod::Other);
    assert_eq!(put.path(), "/index.html");
}

#[test]
fn request_line_without_target_is_rejected() {
    assert_eq!(RequestHead::parse("GET\r\n\r\n"), None);
    assert_eq!(RequestHead::parse(""), None);
}

#[test]
fn body_read_is_clamped() {
    assert_eq!(body_read_len(14, MAX_FORM_BODY, 256), 14);
    assert_eq!(body_read_len(5000, MAX_FORM_BODY, 256), MAX_FORM_BODY);
    assert_eq!(body_read_len(5000, 1000, 256), 256);
    assert_eq!(body_read_len(0, MAX_FORM_BODY, 256), 0);
}

#[test]
fn receive_errors_map_to_body_errors() {
    assert_eq!(BodyError::from(Error::Timeout), BodyError::Timeout);
    for error in [Error::Closed, Error::Parse, Error::NoData, Error::FormatHeaders] {
        assert_eq!(BodyError::from(error), BodyError::Other);
    }
}
