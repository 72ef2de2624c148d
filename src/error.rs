/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The attached request line does not consist of exactly three
    /// space-delimited tokens (method, target, version).
    #[error("malformed request line")]
    RequestLineMalformed(String),

    /// The attached bytes did not parse as valid text for the HTTP request
    /// line.
    #[error("request line is not valid text")]
    RequestLineNotValidText(Vec<u8>),

    /// The version token in the request line is not exactly `HTTP/1.1`.
    #[error("unsupported HTTP version: {0}")]
    UnsupportedHttpVersion(String),

    /// The attached header field line is complete but contains no colon.
    #[error("no colon found in header field line")]
    HeaderLineMissingColon(String),

    /// The attached header field name is empty, contains a character
    /// outside the allowed token set, or has whitespace adjacent to it.
    #[error("malformed header field name: {0:?}")]
    MalformedFieldName(String),

    /// The stream ended while the body was still short of the length
    /// declared by the `Content-Length` header.
    #[error("unexpected end of stream: expected {expected} body bytes, got {received}")]
    UnexpectedEndOfBody {
        /// Number of body bytes the `Content-Length` header declared.
        expected: usize,

        /// Number of body bytes actually received before the stream ended.
        received: usize,
    },

    /// The stream ended before the request line and headers were complete.
    #[error("unexpected end of stream before the request was complete")]
    UnexpectedEndOfStream,

    /// The request previously failed to parse; no further input is
    /// accepted.
    #[error("request is in the error state")]
    RequestInErrorState,

    /// An error occurred reading from the underlying byte stream.
    #[error("unable to read from the underlying stream")]
    Io(#[from] std::io::Error),
}
