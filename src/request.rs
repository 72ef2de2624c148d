//! Incremental parsing of a whole HTTP/1.1 request: request line, header
//! block, then body, in that strict order, over repeated partial inputs.

use std::io::Read;

use super::error::Error;
use super::headers::{HeaderMap, ParseStatus};
use super::{find_crlf, CRLF};

/// Initial capacity of the stream driver's working buffer.  The buffer
/// doubles whenever it fills up with the request still incomplete.
const BUFFER_SIZE: usize = 1024;

/// The first line of an HTTP request.  Immutable once parsed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestLine {
    /// The request method, e.g. `GET`.
    pub method: String,

    /// The request target, e.g. `/index.html`.
    pub target: String,

    /// The protocol version.  Only `1.1` is ever produced.
    pub version: String,
}

/// Parse a request line out of the given bytes.
///
/// Returns `Ok(None)` if no CRLF is present yet; the caller should try
/// again once more bytes arrive.  On success, returns the parsed line
/// along with the number of bytes consumed, including the CRLF.
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, Error> {
    let line_end = match find_crlf(data) {
        Some(line_end) => line_end,
        None => return Ok(None),
    };
    let line = &data[..line_end];
    let consumed = line_end + CRLF.len();
    let line = std::str::from_utf8(line)
        .map_err(|_| Error::RequestLineNotValidText(line.to_vec()))?;
    let tokens = line.split(' ').collect::<Vec<&str>>();
    if tokens.len() != 3 {
        return Err(Error::RequestLineMalformed(line.to_owned()));
    }
    if tokens[2] != "HTTP/1.1" {
        return Err(Error::UnsupportedHttpVersion(tokens[2].to_owned()));
    }
    Ok(Some((
        RequestLine {
            method: tokens[0].to_owned(),
            target: tokens[1].to_owned(),
            version: "1.1".to_owned(),
        },
        consumed,
    )))
}

/// Phase the request parser is in.  The state only ever advances; once
/// [`Done`](ParserState::Done) or [`Error`](ParserState::Error) is
/// reached, no further input is consumed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParserState {
    /// Waiting for the request line.
    Init,

    /// Request line parsed; consuming header field lines.
    Headers,

    /// Header block complete; collecting body bytes.
    Body,

    /// The whole request has been parsed.
    Done,

    /// A previous input was malformed; the request is unusable.
    Error,
}

/// An HTTP request, parsed incrementally.  Create one with
/// [`Request::new`], feed it bytes with [`Request::parse`] until
/// [`Request::done`] reports `true`, or let [`Request::from_reader`]
/// drive the whole exchange.
#[derive(Debug, Eq, PartialEq)]
pub struct Request {
    /// Method, target, and version from the request line.
    pub request_line: RequestLine,

    /// The parsed header fields.
    pub headers: HeaderMap,

    /// The body, exactly `content-length` bytes once parsing is done.
    pub body: Vec<u8>,

    state: ParserState,
}

impl Request {
    /// Create a new, empty request in the initial parser state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_line: RequestLine::default(),
            headers: HeaderMap::new(),
            body: Vec::new(),
            state: ParserState::Init,
        }
    }

    /// The current parser state.
    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Whether the request has been completely parsed.
    #[must_use]
    pub fn done(&self) -> bool {
        self.state == ParserState::Done
    }

    /// The declared body length.  A missing or non-numeric
    /// `Content-Length` header means no body is expected.
    fn content_length(&self) -> usize {
        self.headers
            .get("content-length")
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    /// Feed newly arrived bytes to the parser, returning how many of
    /// them were consumed.  Unconsumed bytes must be presented again,
    /// first, on the next call.
    ///
    /// A single call advances through as many parse stages as the given
    /// bytes allow; it returns as soon as a stage needs more data.
    /// Consuming zero bytes is the normal "come back with more" signal,
    /// not an error.  Any parse error is permanent: the request moves to
    /// the error state and every later call fails with
    /// [`Error::RequestInErrorState`].
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, Error> {
        let mut consumed = 0;
        loop {
            let remainder = &data[consumed..];
            match self.state {
                ParserState::Error => return Err(Error::RequestInErrorState),
                ParserState::Init => match parse_request_line(remainder) {
                    Err(error) => {
                        self.state = ParserState::Error;
                        return Err(error);
                    },
                    Ok(None) => return Ok(consumed),
                    Ok(Some((request_line, count))) => {
                        self.request_line = request_line;
                        consumed += count;
                        self.state = ParserState::Headers;
                    },
                },
                ParserState::Headers => {
                    let results = match self.headers.parse(remainder) {
                        Ok(results) => results,
                        Err(error) => {
                            self.state = ParserState::Error;
                            return Err(error);
                        },
                    };
                    consumed += results.consumed;
                    match results.status {
                        ParseStatus::Complete => {
                            self.state = if self.content_length() > 0 {
                                ParserState::Body
                            } else {
                                ParserState::Done
                            };
                        },
                        ParseStatus::Incomplete => return Ok(consumed),
                    }
                },
                ParserState::Body => {
                    let declared = self.content_length();
                    let needed = declared - self.body.len();
                    let count = needed.min(remainder.len());
                    self.body.extend_from_slice(&remainder[..count]);
                    consumed += count;
                    if self.body.len() < declared {
                        return Ok(consumed);
                    }
                    self.state = ParserState::Done;
                },
                ParserState::Done => return Ok(consumed),
            }
        }
    }

    /// Read a complete request from the given byte stream.
    ///
    /// Reads into a working buffer, feeds the buffered bytes to
    /// [`parse`](Request::parse), and compacts away whatever was
    /// consumed, until the request is done.  Short reads are expected;
    /// the stream ending before the request is complete is an error.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut request = Self::new();
        let mut buffer = vec![0; BUFFER_SIZE];
        let mut filled = 0;
        while !request.done() {
            if filled == buffer.len() {
                buffer.resize(buffer.len() * 2, 0);
            }
            let received = reader.read(&mut buffer[filled..])?;
            filled += received;
            let consumed = request.parse(&buffer[..filled])?;
            buffer.copy_within(consumed..filled, 0);
            filled -= consumed;
            if received == 0 {
                match request.state {
                    ParserState::Done => break,
                    ParserState::Body => {
                        return Err(Error::UnexpectedEndOfBody {
                            expected: request.content_length(),
                            received: request.body.len(),
                        });
                    },
                    _ => return Err(Error::UnexpectedEndOfStream),
                }
            }
        }
        Ok(request)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
