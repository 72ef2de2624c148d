//! Storage and incremental parsing of HTTP header fields.  Names are
//! validated against the token character set, stored lower-cased, and
//! looked up case-insensitively; repeated fields accumulate into one
//! comma-joined value.  The map is the single place where those
//! invariants are enforced, so callers never normalize keys themselves.

use std::collections::HashMap;

use super::error::Error;
use super::{find_crlf, CRLF};

/// Indication of whether or not the header block terminator (an empty
/// line) was reached during a call to [`HeaderMap::parse`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseStatus {
    /// The terminating empty line was found; the header block is complete.
    Complete,

    /// More input is required; this is not an error.
    Incomplete,
}

/// The outcome of one call to [`HeaderMap::parse`].
#[derive(Debug, Eq, PartialEq)]
pub struct ParseResults {
    /// Whether or not the header block terminator was reached.
    pub status: ParseStatus,

    /// Number of input bytes consumed by this call.  Only complete field
    /// lines are consumed; a partial trailing line is left for the next
    /// call.
    pub consumed: usize,
}

/// Check whether the given byte may appear in a header field name, per
/// the `token` rule: ASCII letters, digits, and a fixed symbol set.
fn is_token_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// Strip leading and trailing spaces and tabs.  Interior whitespace is
/// preserved verbatim.
fn trim_whitespace(mut value: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = value {
        value = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = value {
        value = rest;
    }
    value
}

/// Collection of HTTP header fields with case-insensitive names.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HeaderMap {
    fields: HashMap<String, String>,
}

impl HeaderMap {
    /// Create a new, empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value stored for the given name.  The lookup is
    /// case-insensitive.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Check whether a field with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_ascii_lowercase())
    }

    /// The number of distinct (normalized) field names stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add a field value.  The name is lower-cased for storage; if a
    /// value is already stored under the same normalized name, the new
    /// value is appended to it after a `", "` separator.
    pub fn add(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.fields.get_mut(&name) {
            Some(stored) => {
                stored.push_str(", ");
                stored.push_str(value);
            },
            None => {
                self.fields.insert(name, value.to_owned());
            },
        }
    }

    /// Consume header field lines from the given bytes until either the
    /// empty line terminating the header block is reached, or no complete
    /// line remains.  May be called repeatedly on the same map as more
    /// bytes arrive; parsed fields persist across calls.
    ///
    /// Running out of input mid-line is not an error: the partial line is
    /// left unconsumed and the status is
    /// [`Incomplete`](ParseStatus::Incomplete).
    pub fn parse(&mut self, data: &[u8]) -> Result<ParseResults, Error> {
        let mut consumed = 0;
        loop {
            let remainder = &data[consumed..];
            match find_crlf(remainder) {
                None => {
                    return Ok(ParseResults {
                        status: ParseStatus::Incomplete,
                        consumed,
                    });
                },
                Some(0) => {
                    // Empty line: end of the header block.
                    consumed += CRLF.len();
                    return Ok(ParseResults {
                        status: ParseStatus::Complete,
                        consumed,
                    });
                },
                Some(line_end) => {
                    self.parse_field_line(&remainder[..line_end])?;
                    consumed += line_end + CRLF.len();
                },
            }
        }
    }

    /// Validate and store one complete field line (without its CRLF).
    fn parse_field_line(&mut self, line: &[u8]) -> Result<(), Error> {
        let colon = line.iter().position(|&byte| byte == b':').ok_or_else(|| {
            Error::HeaderLineMissingColon(String::from_utf8_lossy(line).into_owned())
        })?;
        let name = &line[..colon];
        if name.is_empty() || !name.iter().copied().all(is_token_char) {
            return Err(Error::MalformedFieldName(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }

        // The name is all token characters, hence valid ASCII.
        let name = String::from_utf8_lossy(name);
        let value = trim_whitespace(&line[colon + 1..]);
        self.add(&name, &String::from_utf8_lossy(value));
        Ok(())
    }
}
