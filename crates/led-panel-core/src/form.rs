//! Control page form decoding
//!
//! The page posts `mode=<d>&speed=<d>` as `application/x-www-form-urlencoded`.
//! Fields are looked up by name instead of by byte offset, so field order and
//! extra fields do not matter. Values that are not a single ASCII digit decode
//! to `0`, which no preset uses.

use crate::plan::{PlaybackPlan, build_plan};

/// Maximum number of body bytes considered when decoding a form.
pub const MAX_FORM_BODY: usize = 100;

const MODE_FIELD: &[u8] = b"mode";
const SPEED_FIELD: &[u8] = b"speed";

/// Raw selection decoded from a form body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub mode: u8,
    pub speed: u8,
}

impl Selection {
    pub const fn new(mode: u8, speed: u8) -> Self {
        Self { mode, speed }
    }

    /// Decode a selection from a form body.
    ///
    /// Only the first [`MAX_FORM_BODY`] bytes are looked at. Missing or
    /// malformed fields are left at `0`; a repeated field keeps its last value.
    pub fn from_form(body: &[u8]) -> Self {
        let body = &body[..body.len().min(MAX_FORM_BODY)];
        let mut selection = Self::default();

        for pair in body.split(|&b| b == b'&') {
            let Some((key, value)) = split_pair(pair) else {
                continue;
            };
            match key {
                MODE_FIELD => selection.mode = parse_digit(value),
                SPEED_FIELD => selection.speed = parse_digit(value),
                _ => {}
            }
        }

        selection
    }

    /// Turn the selection into a plan.
    pub const fn plan(&self) -> PlaybackPlan {
        build_plan(self.mode, self.speed)
    }
}

fn split_pair(pair: &[u8]) -> Option<(&[u8], &[u8])> {
    let eq = pair.iter().position(|&b| b == b'=')?;
    Some((&pair[..eq], &pair[eq + 1..]))
}

fn parse_digit(value: &[u8]) -> u8 {
    match value.trim_ascii() {
        [digit @ b'0'..=b'9'] => digit - b'0',
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_parsing() {
        assert_eq!(parse_digit(b"4"), 4);
        assert_eq!(parse_digit(b" 2\r\n"), 2);
        assert_eq!(parse_digit(b"12"), 0);
        assert_eq!(parse_digit(b""), 0);
        assert_eq!(parse_digit(b"x"), 0);
    }

    #[test]
    fn pair_without_separator_is_skipped() {
        assert_eq!(split_pair(b"mode"), None);
        assert_eq!(split_pair(b"mode="), Some((&b"mode"[..], &b""[..])));
    }
}
