use std::io;
use std::str::Utf8Error;

use thiserror::Error;
use tokio::time::error::Elapsed;

/// Everything that can go wrong while querying a server.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to bind a local UDP port: {0}")]
    FailedPortBind(#[source] io::Error),
    #[error("could not resolve host {host}")]
    UnresolvedHost {
        host: String,
        #[source]
        source: Option<io::Error>,
    },
    #[error("host is unreachable: {0}")]
    UnreachableHost(#[source] io::Error),
    #[error("failed to send packet: {0}")]
    SendError(#[source] io::Error),
    #[error("failed to receive packet: {0}")]
    ReceiveError(#[source] io::Error),
    #[error("timed out waiting for the server")]
    Timeout(#[from] Elapsed),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("handshake failed: {0}")]
    Handshake(#[from] HandshakeError),
}

impl QueryError {
    /// `true` if the server never answered, as opposed to answering with garbage.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}

/// A response broke a structural expectation of the protocol.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown packet header {0}")]
    UnknownPacketHeader(i32),
    #[error("expected packet type {expected:#04x}, got {found:#04x}")]
    UnexpectedPacketType { expected: u8, found: u8 },
    #[error("server issued more than {0} challenges")]
    TooManyChallenges(usize),
    #[error("response ended early at offset {0}")]
    Truncated(usize),
    #[error("string starting at offset {0} is not NUL-terminated")]
    UnterminatedString(usize),
    #[error("invalid UTF-8 in string field: {0}")]
    InvalidUtf8(#[from] Utf8Error),
    #[error("invalid decimal field {0:?}")]
    InvalidNumber(String),
    #[error("full stats response has no player section")]
    MissingPlayerSection,
}

/// A query-protocol response did not answer the outstanding request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandshakeError {
    #[error("expected response type {expected}, got {found}")]
    UnexpectedType { expected: u8, found: u8 },
    #[error("expected session id {expected}, got {found:#010x}")]
    SessionMismatch { expected: u16, found: u32 },
    #[error("invalid challenge token {0:?}")]
    InvalidChallengeToken(String),
}
