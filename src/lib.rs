#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Incremental parser for HTTP/1.1 requests read straight off a TCP
//! stream.  The stream may deliver bytes in arbitrarily small chunks;
//! the parser is resumable, never re-parses or drops bytes, and reports
//! exactly how many bytes it consumed on every call.
//!
//! Feed a [`Request`] yourself with [`Request::parse`], or hand the
//! whole stream to [`Request::from_reader`] and get back a completed
//! request or a typed [`Error`].

mod error;
mod headers;
mod request;

pub use crate::error::Error;
pub use crate::headers::{HeaderMap, ParseResults, ParseStatus};
pub use crate::request::{ParserState, Request, RequestLine};

// This is the character sequence corresponding to a carriage return (CR)
// followed by a line feed (LF), which officially delimits each
// line of an HTTP request.
const CRLF: &[u8] = b"\r\n";

/// Locate the first CRLF in the given bytes, returning the offset of the
/// carriage return.
fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|window| window == CRLF)
}
